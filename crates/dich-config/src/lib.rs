use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::storage::StorageConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod storage;
pub mod translator;
pub mod ui;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,

    /// Quiescence window before a translation fires
    pub debounce_ms: u64,
    /// Transport timeout for a single translate call
    pub request_timeout_ms: u64,
    pub log_json: bool,
}

impl Config {
    pub fn new() -> Self {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let debounce_ms = env::var("DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(150); // 150ms default

        let request_timeout_ms = env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10000); // 10 seconds default

        let log_json = env::var("LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Config {
            translator: TranslatorConfig::new(),
            storage: StorageConfig::new(),
            ui: UiConfig::default(),

            debounce_ms,
            request_timeout_ms,
            log_json,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
            debounce_ms: 150,
            request_timeout_ms: 10000,
            log_json: false,
        }
    }
}
