use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dich_config::Config;
use dich_core::{JsonFileStore, KeyValueStore, MemoryStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::{AppController, ChannelSet};
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "dich", version, about = "Live translation as you type")]
struct Cli {
    /// Quiescence window before translating, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,
    /// File that stores the selected languages
    #[arg(long)]
    prefs_path: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
    /// Keep preferences in memory only
    #[arg(long)]
    memory_store: bool,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if let Some(path) = &self.prefs_path {
            config.storage.path = path.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.translator.api_url = api_url.clone();
        }
        config.log_json |= self.log_json;
        config
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(Config::new());
    init_tracing(config.log_json);

    let storage: Arc<dyn KeyValueStore> = if cli.memory_store {
        tracing::info!("Preferences kept in memory");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!(path = %config.storage.path.display(), "Preferences file");
        Arc::new(JsonFileStore::new(config.storage.path.clone()))
    };

    let channels = ChannelSet::new();
    let state = Arc::new(AppState::new(config, storage)?);
    let controller = AppController::new(state, channels);
    let mut tasks = controller.spawn_tasks();
    let cancelled = controller.cancelled();

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        _ = cancelled.cancelled() => {
            tracing::info!("Quit");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("task ended with error during shutdown: {e}");
        }
    }

    Ok(())
}
