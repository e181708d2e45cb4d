use dich_config::ui::UiConfig;
use dich_core::LanguageCatalog;
use dich_types::DisplayState;

use crate::ui::render;

fn display() -> DisplayState {
    DisplayState {
        source_language: "auto".to_string(),
        target_language: "vi".to_string(),
        ..DisplayState::default()
    }
}

#[test]
fn idle_frame_shows_placeholder() {
    let frame = render(&display(), &LanguageCatalog::builtin(), &UiConfig::default());
    assert_eq!(frame, "[Detect language] -> [Vietnamese]\nTranslation");
}

#[test]
fn translation_frame_names_detected_language() {
    let state = DisplayState {
        source_text: "hello".to_string(),
        translated_text: "xin chào".to_string(),
        detected_language: "en".to_string(),
        ..display()
    };

    let frame = render(&state, &LanguageCatalog::builtin(), &UiConfig::default());
    assert_eq!(frame, "[English - detected] -> [Vietnamese]\nxin chào");
}

#[test]
fn errors_win_over_translations() {
    let state = DisplayState {
        source_text: "hello".to_string(),
        translated_text: "xin chào".to_string(),
        error_message: "Network error".to_string(),
        ..display()
    };

    let frame = render(&state, &LanguageCatalog::builtin(), &UiConfig::default());
    assert!(frame.ends_with("\n! Network error"));
}

#[test]
fn loading_appends_dots() {
    let state = DisplayState {
        source_text: "hello".to_string(),
        translated_text: "Translating".to_string(),
        loading: true,
        ..display()
    };

    let frame = render(&state, &LanguageCatalog::builtin(), &UiConfig::default());
    assert!(frame.ends_with("\nTranslating ..."));
}
