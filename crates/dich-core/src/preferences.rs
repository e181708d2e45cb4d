use std::sync::Arc;

use dich_types::{LanguageSlot, PreferenceRecord, PreferenceUpdate};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::LanguageCatalog;
use crate::error::StorageError;
use crate::storage::KeyValueStore;

const SOURCE_FIELD: &str = "sourceLanguage";
const TARGET_FIELD: &str = "translateLanguage";
const TARGET_FIELD_ALIAS: &str = "targetLanguage";

/// Loosely typed view of whatever is stored, so one bad field
/// does not discard the other
#[derive(Deserialize, Default)]
struct StoredRecord {
    #[serde(rename = "sourceLanguage")]
    source_language: Option<String>,
    #[serde(rename = "translateLanguage", alias = "targetLanguage")]
    target_language: Option<String>,
}

/// Remembers the last used language pair across popup sessions.
///
/// Storage failures never reach the caller: they are logged and the
/// session continues with in-memory preferences.
pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    catalog: Arc<LanguageCatalog>,
}

impl PreferenceStore {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        catalog: Arc<LanguageCatalog>,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            catalog,
        }
    }

    /// Stored record, or the default pair if nothing usable is stored.
    /// Defaults are not written back.
    pub async fn load(&self) -> PreferenceRecord {
        match self.try_load().await {
            Ok(Some(record)) => {
                tracing::debug!(?record, "preferences loaded");
                record
            }
            Ok(None) => {
                tracing::info!("No stored preferences, using defaults");
                PreferenceRecord::default()
            }
            Err(e) => {
                tracing::error!("Error loading preferences: {e}");
                PreferenceRecord::default()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Option<PreferenceRecord>, StorageError> {
        let Some(value) = self.storage.get(&self.key).await? else {
            return Ok(None);
        };

        let stored: StoredRecord = match serde_json::from_value(value) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Ignoring malformed preference record: {e}");
                return Ok(None);
            }
        };

        let defaults = PreferenceRecord::default();
        Ok(Some(PreferenceRecord {
            source_language: self.validated(
                stored.source_language,
                LanguageSlot::Source,
                defaults.source_language,
            ),
            target_language: self.validated(
                stored.target_language,
                LanguageSlot::Target,
                defaults.target_language,
            ),
        }))
    }

    /// Merge `update` into the stored record and write it back.
    /// Fields not in `update` keep their stored value.
    pub async fn save(&self, update: PreferenceUpdate) {
        match self.try_save(update).await {
            Ok(record) => tracing::info!(?record, "preferences saved"),
            Err(e) => tracing::error!("Error saving preferences: {e}"),
        }
    }

    pub async fn try_save(&self, update: PreferenceUpdate) -> Result<PreferenceRecord, StorageError> {
        let mut fields = match self.storage.get(&self.key).await? {
            Some(Value::Object(map)) => map,
            _ => default_fields(),
        };

        if let Some(source) = update.source_language {
            fields.insert(SOURCE_FIELD.to_string(), Value::String(source));
        }
        if let Some(target) = update.target_language {
            fields.remove(TARGET_FIELD_ALIAS);
            fields.insert(TARGET_FIELD.to_string(), Value::String(target));
        }

        let merged = Value::Object(fields);
        let record = record_from(&merged);
        self.storage.set(&self.key, merged).await?;

        Ok(record)
    }

    fn validated(&self, code: Option<String>, slot: LanguageSlot, fallback: String) -> String {
        match code {
            Some(code) if self.catalog.is_valid(&code, slot) => code,
            Some(code) => {
                tracing::warn!(%code, ?slot, "Stored language not in catalog, using default");
                fallback
            }
            None => fallback,
        }
    }
}

fn default_fields() -> Map<String, Value> {
    let defaults = PreferenceRecord::default();
    let mut fields = Map::new();
    fields.insert(SOURCE_FIELD.to_string(), Value::String(defaults.source_language));
    fields.insert(TARGET_FIELD.to_string(), Value::String(defaults.target_language));
    fields
}

fn record_from(value: &Value) -> PreferenceRecord {
    let defaults = PreferenceRecord::default();
    let field = |name: &str| value.get(name).and_then(|v| v.as_str()).map(str::to_string);

    PreferenceRecord {
        source_language: field(SOURCE_FIELD).unwrap_or(defaults.source_language),
        target_language: field(TARGET_FIELD)
            .or_else(|| field(TARGET_FIELD_ALIAS))
            .unwrap_or(defaults.target_language),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::storage::MemoryStore;

    fn store_with(storage: Arc<dyn KeyValueStore>) -> PreferenceStore {
        PreferenceStore::new(storage, "popupState", Arc::new(LanguageCatalog::builtin()))
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<Value>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }

        async fn set(&self, _key: &str, _value: Value) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn load_defaults_without_persisting() {
        let storage = Arc::new(MemoryStore::new());
        let prefs = store_with(storage.clone());

        assert_eq!(prefs.load().await, PreferenceRecord::default());
        assert!(storage.get("popupState").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_merges_instead_of_overwriting() {
        let storage = Arc::new(MemoryStore::new());
        let prefs = store_with(storage.clone());

        prefs.save(PreferenceUpdate::target("vi")).await;
        prefs.save(PreferenceUpdate::source("fr")).await;

        let record = prefs.load().await;
        assert_eq!(record.source_language, "fr");
        assert_eq!(record.target_language, "vi");
    }

    #[tokio::test]
    async fn save_preserves_unrelated_fields() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                "popupState",
                json!({"sourceLanguage": "ja", "translateLanguage": "en", "theme": "dark"}),
            )
            .await
            .unwrap();
        let prefs = store_with(storage.clone());

        let record = prefs.try_save(PreferenceUpdate::source("vi")).await.unwrap();
        assert_eq!(record.source_language, "vi");
        assert_eq!(record.target_language, "en");

        let raw = storage.get("popupState").await.unwrap().unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[tokio::test]
    async fn legacy_target_field_is_read_and_replaced() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set("popupState", json!({"sourceLanguage": "ja", "targetLanguage": "vi"}))
            .await
            .unwrap();
        let prefs = store_with(storage.clone());

        assert_eq!(prefs.load().await.target_language, "vi");

        prefs.save(PreferenceUpdate::target("en")).await;
        let raw = storage.get("popupState").await.unwrap().unwrap();
        assert!(raw.get("targetLanguage").is_none());
        assert_eq!(raw["translateLanguage"], "en");
    }

    #[tokio::test]
    async fn unknown_codes_fall_back_per_field() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set("popupState", json!({"sourceLanguage": "klingon", "translateLanguage": "auto"}))
            .await
            .unwrap();
        let prefs = store_with(storage);

        let record = prefs.load().await;
        assert_eq!(record.source_language, "auto");
        assert_eq!(record.target_language, "en");
    }

    #[tokio::test]
    async fn malformed_record_is_treated_as_absent() {
        let storage = Arc::new(MemoryStore::new());
        storage.set("popupState", json!("garbage")).await.unwrap();
        let prefs = store_with(storage.clone());

        assert_eq!(prefs.load().await, PreferenceRecord::default());

        prefs.save(PreferenceUpdate::target("ja")).await;
        let record = prefs.load().await;
        assert_eq!(record.source_language, "auto");
        assert_eq!(record.target_language, "ja");
    }

    #[tokio::test]
    async fn storage_failures_degrade_to_defaults() {
        let prefs = store_with(Arc::new(BrokenStore));

        assert_eq!(prefs.load().await, PreferenceRecord::default());
        // Logged, not propagated
        prefs.save(PreferenceUpdate::source("ja")).await;
        assert!(prefs.try_save(PreferenceUpdate::source("ja")).await.is_err());
    }
}
