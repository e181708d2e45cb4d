use std::sync::Arc;

use dich_types::{AppEvent, LanguageSlot};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod command;
pub mod list_languages;
pub mod select_language;

use list_languages::handle_list_languages;
use select_language::handle_language_selection;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    state.restore_preferences().await;

    tracing::debug!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = input_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        if matches!(event, AppEvent::Quit) {
            tracing::info!("Quit requested");
            cancel.cancel();
            break;
        }

        handle_events(&state, &app_to_ui_tx, event).await?;
    }

    Ok(())
}

async fn handle_events(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    let coordinator = &state.coordinator;

    match event {
        AppEvent::TextInput(text) => {
            tracing::debug!("TextInput received: {} chars", text.chars().count());
            coordinator.set_source_text(text).await;
        }
        AppEvent::SelectLanguage { slot, query } => {
            handle_language_selection(state, slot, &query, app_to_ui_tx).await?;
        }
        AppEvent::SwapLanguages => {
            if !coordinator.swap_languages().await {
                app_to_ui_tx
                    .send(AppEvent::Notice("Swap unavailable right now".to_string()))
                    .await?;
            }
        }
        AppEvent::Clear => coordinator.clear().await,
        AppEvent::ListLanguages(query) => {
            handle_list_languages(state, query.as_deref(), LanguageSlot::Source, app_to_ui_tx)
                .await?;
        }
        AppEvent::Notice(text) => {
            app_to_ui_tx.send(AppEvent::Notice(text)).await?;
        }
        AppEvent::Render(_) | AppEvent::Quit => {
            // UI-only / handled by the loop
        }
    }

    Ok(())
}
