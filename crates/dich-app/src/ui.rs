use std::io::Write;
use std::sync::Arc;

use dich_config::ui::UiConfig;
use dich_core::LanguageCatalog;
use dich_types::{AppEvent, DisplayState, PanelOutput};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Bridge coordinator snapshots into the UI channel. Changes made while
/// the UI is busy collapse into the newest one.
pub async fn forward_display(
    mut display_rx: watch::Receiver<DisplayState>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            changed = display_rx.changed() => changed?,
            _ = cancel.cancelled() => break,
        }
        let state = display_rx.borrow_and_update().clone();

        tokio::select! {
            sent = app_to_ui_tx.send(AppEvent::Render(state)) => sent?,
            _ = cancel.cancelled() => break,
        }
    }

    Ok(())
}

/// Draw every change to stdout
pub async fn ui_loop(
    state: Arc<AppState>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ui = &state.ui;
    let mut last_frame = String::new();

    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        let text = match event {
            AppEvent::Render(display) => {
                let frame = render(&display, &state.catalog, ui);
                if frame == last_frame {
                    continue;
                }
                last_frame = frame.clone();
                frame
            }
            AppEvent::Notice(notice) => notice,
            _ => continue,
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()?;
    }

    Ok(())
}

/// One frame: the language header line, then the output panel
pub fn render(display: &DisplayState, catalog: &LanguageCatalog, ui: &UiConfig) -> String {
    let source = catalog.source_header(display, &ui.detected_suffix);
    let target = catalog
        .label(&display.target_language)
        .unwrap_or(&display.target_language);

    let output = match display.output() {
        PanelOutput::Error(message) => format!("! {message}"),
        PanelOutput::Translation(text) => text,
        PanelOutput::Translating => ui.translating_text.clone(),
        PanelOutput::Idle => ui.output_placeholder.clone(),
    };
    let dots = if display.loading { " ..." } else { "" };

    format!("[{source}] -> [{target}]\n{output}{dots}")
}
