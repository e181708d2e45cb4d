use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

/// Source-only sentinel asking the remote service to detect the language
pub const AUTO_DETECT: &str = "auto";

pub const DEFAULT_SOURCE_LANGUAGE: &str = AUTO_DETECT;
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

pub fn is_auto(code: &str) -> bool {
    code == AUTO_DETECT
}

/// Which side of the language pair a selection applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSlot {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: LanguageCode,
    pub label: String,
}

/// Persisted language pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(rename = "sourceLanguage")]
    pub source_language: LanguageCode,
    #[serde(rename = "translateLanguage", alias = "targetLanguage")]
    pub target_language: LanguageCode,
}

impl Default for PreferenceRecord {
    fn default() -> Self {
        Self {
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }
}

/// Partial update merged into the persisted record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceUpdate {
    pub source_language: Option<LanguageCode>,
    pub target_language: Option<LanguageCode>,
}

impl PreferenceUpdate {
    pub fn source(code: impl Into<LanguageCode>) -> Self {
        Self {
            source_language: Some(code.into()),
            target_language: None,
        }
    }

    pub fn target(code: impl Into<LanguageCode>) -> Self {
        Self {
            source_language: None,
            target_language: Some(code.into()),
        }
    }

    pub fn pair(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            source_language: Some(source.into()),
            target_language: Some(target.into()),
        }
    }
}

/// Snapshot of everything the popup renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub source_text: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
    pub translated_text: String,
    /// Empty when nothing was detected
    pub detected_language: LanguageCode,
    /// Empty when there is no error
    pub error_message: String,
    pub loading: bool,
}

/// What the output panel shows, in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutput {
    Error(String),
    Translation(String),
    Translating,
    Idle,
}

impl DisplayState {
    pub fn output(&self) -> PanelOutput {
        if !self.error_message.is_empty() {
            PanelOutput::Error(self.error_message.clone())
        } else if self.source_text.trim().is_empty() {
            PanelOutput::Idle
        } else if self.translated_text.trim().is_empty() {
            PanelOutput::Translating
        } else {
            PanelOutput::Translation(self.translated_text.clone())
        }
    }

    pub fn has_detected_language(&self) -> bool {
        !self.detected_language.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput(String),
    SelectLanguage { slot: LanguageSlot, query: String },
    SwapLanguages,
    Clear,
    ListLanguages(Option<String>),
    Render(DisplayState),
    Notice(String),
    Quit,
}
