use dich_types::{AppEvent, LanguageSlot};
use kanal::AsyncSender;

use crate::state::AppState;

/// Pick the first catalog match, the way Enter does in the picker
pub async fn handle_language_selection(
    state: &AppState,
    slot: LanguageSlot,
    query: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(language) = state.catalog.resolve(query, slot) else {
        app_to_ui_tx
            .send(AppEvent::Notice(format!("No language matches '{query}'")))
            .await?;
        return Ok(());
    };

    let code = language.code.clone();
    tracing::debug!(?slot, %code, "language selected");

    match slot {
        LanguageSlot::Source => state.coordinator.set_source_language(code).await,
        LanguageSlot::Target => {
            if let Err(e) = state.coordinator.set_target_language(code).await {
                app_to_ui_tx.send(AppEvent::Notice(e.to_string())).await?;
            }
        }
    }

    Ok(())
}
