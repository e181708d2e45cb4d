use dich_types::{AppEvent, LanguageSlot};

/// Lines starting with `:` are commands, anything else is text to translate.
/// A leading `::` escapes a literal colon.
pub fn parse_line(line: &str) -> AppEvent {
    let Some(rest) = line.strip_prefix(':') else {
        return AppEvent::TextInput(line.to_string());
    };

    if rest.starts_with(':') {
        return AppEvent::TextInput(rest.to_string());
    }

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };

    match name {
        "from" | "source" => select(LanguageSlot::Source, arg),
        "to" | "target" => select(LanguageSlot::Target, arg),
        "swap" => AppEvent::SwapLanguages,
        "clear" => AppEvent::Clear,
        "langs" => AppEvent::ListLanguages((!arg.is_empty()).then(|| arg.to_string())),
        "q" | "quit" => AppEvent::Quit,
        other => AppEvent::Notice(format!("Unknown command :{other}")),
    }
}

fn select(slot: LanguageSlot, query: &str) -> AppEvent {
    if query.is_empty() {
        return AppEvent::Notice("Which language?".to_string());
    }

    AppEvent::SelectLanguage {
        slot,
        query: query.to_string(),
    }
}
