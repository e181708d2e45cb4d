use std::io::BufRead;

use dich_types::AppEvent;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::events::command::parse_line;

/// Turn stdin lines into app events until EOF or cancellation.
///
/// Reads happen on a detached thread: a blocking stdin read cannot be
/// cancelled and would otherwise hold up runtime shutdown.
pub async fn watch_stdin(
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let tx = event_tx.to_sync();

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {e}");
                        break;
                    }
                };

                let event = parse_line(&line);
                tracing::debug!(?event, "input");
                if tx.send(event).is_err() {
                    return;
                }
            }

            tracing::info!("stdin closed");
            let _ = tx.send(AppEvent::Quit);
        })?;

    cancel.cancelled().await;
    tracing::info!("Input watcher stopping");

    Ok(())
}
