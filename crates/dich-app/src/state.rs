use std::sync::Arc;

use dich_config::Config;
use dich_config::ui::UiConfig;
use dich_core::{KeyValueStore, LanguageCatalog, PreferenceStore, TranslationCoordinator};
use dich_translator::{DictTranslator, Translator};

pub struct AppState {
    pub ui: UiConfig,
    pub catalog: Arc<LanguageCatalog>,
    pub preferences: Arc<PreferenceStore>,
    pub coordinator: TranslationCoordinator,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let translator = DictTranslator::new(
            config.translator.api_url.clone(),
            config.translator.client.clone(),
            config.request_timeout(),
        )?;
        tracing::info!(provider = %translator.metadata().name, "translator ready");

        Ok(Self::with_translator(config, storage, Arc::new(translator)))
    }

    pub fn with_translator(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let catalog = Arc::new(LanguageCatalog::builtin());
        let preferences = Arc::new(PreferenceStore::new(
            storage,
            config.storage.record_key.clone(),
            catalog.clone(),
        ));
        let coordinator =
            TranslationCoordinator::new(translator, preferences.clone(), catalog.clone(), &config);

        Self {
            ui: config.ui,
            catalog,
            preferences,
            coordinator,
        }
    }

    /// Read the stored language pair once at startup
    pub async fn restore_preferences(&self) {
        let record = self.preferences.load().await;
        tracing::info!(
            source = %record.source_language,
            target = %record.target_language,
            "restoring language pair"
        );
        self.coordinator.restore(record).await;
    }
}
