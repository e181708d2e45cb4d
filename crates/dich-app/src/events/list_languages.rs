use dich_types::{AppEvent, LanguageSlot};
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_list_languages(
    state: &AppState,
    query: Option<&str>,
    slot: LanguageSlot,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let languages = state.catalog.search(query.unwrap_or(""), slot);

    let text = if languages.is_empty() {
        "No matching languages".to_string()
    } else {
        languages
            .iter()
            .map(|l| format!("{:<6} {}", l.code, l.label))
            .collect::<Vec<_>>()
            .join("\n")
    };

    app_to_ui_tx.send(AppEvent::Notice(text)).await?;
    Ok(())
}
