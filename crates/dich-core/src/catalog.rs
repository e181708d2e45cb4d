use std::cmp::Ordering;

use dich_types::{AUTO_DETECT, DisplayState, Language, LanguageSlot, is_auto};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    (AUTO_DETECT, "Detect language"),
    ("ja", "Japanese"),
    ("sv", "Swedish"),
    ("ar", "Arabic"),
    ("uz", "Uzbek"),
    ("mt", "Maltese"),
    ("fy", "Frisian"),
    ("et", "Estonian"),
    ("ms", "Malay"),
    ("hu", "Hungarian"),
    ("la", "Latin"),
    ("cy", "Welsh"),
    ("mi", "Māori"),
    ("is", "Icelandic"),
    ("haw", "Hawaiian"),
    ("zh-CN", "Chinese (Simplified)"),
    ("vi", "Vietnamese"),
    ("en", "English"),
];

/// Immutable, display-ordered set of selectable languages.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(entries: impl IntoIterator<Item = Language>) -> Self {
        let mut entries: Vec<Language> = entries.into_iter().collect();
        entries.sort_by(|a, b| compare_labels(&a.label, &b.label));
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_LANGUAGES.iter().map(|(code, label)| Language {
            code: code.to_string(),
            label: label.to_string(),
        }))
    }

    pub fn entries(&self) -> &[Language] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.entries.iter().find(|l| l.code == code)
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.get(code).map(|l| l.label.as_str())
    }

    /// Known code that may be used on the given side
    pub fn is_valid(&self, code: &str, slot: LanguageSlot) -> bool {
        self.get(code).is_some() && !(slot == LanguageSlot::Target && is_auto(code))
    }

    /// Entries offered in the picker for the given side; targets never see `auto`
    pub fn options(&self, slot: LanguageSlot) -> impl Iterator<Item = &Language> {
        self.entries
            .iter()
            .filter(move |l| slot == LanguageSlot::Source || !is_auto(&l.code))
    }

    /// Case-insensitive label filter, in display order
    pub fn search(&self, query: &str, slot: LanguageSlot) -> Vec<&Language> {
        let needle = query.trim().to_lowercase();
        self.options(slot)
            .filter(|l| l.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact code first, otherwise the first label hit
    pub fn resolve(&self, query: &str, slot: LanguageSlot) -> Option<&Language> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.options(slot)
            .find(|l| l.code.eq_ignore_ascii_case(query))
            .or_else(|| self.search(query, slot).into_iter().next())
    }

    /// Source picker label: `"<detected> - <suffix>"` once something was
    /// detected, the selected source otherwise
    pub fn source_header(&self, state: &DisplayState, detected_suffix: &str) -> String {
        if let Some(label) = self.label(&state.detected_language) {
            return format!("{label} - {detected_suffix}");
        }

        self.label(&state.source_language)
            .map(str::to_string)
            .unwrap_or_else(|| state.source_language.clone())
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Accent-insensitive primary ordering, full label as tiebreak
fn compare_labels(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(label: &str) -> String {
    label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
