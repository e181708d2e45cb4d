use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dich")
        .join("storage.json")
}

fn default_record_key() -> String {
    "popupState".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file backing the key-value store
    #[serde(default = "default_path")]
    pub path: PathBuf,
    #[serde(default = "default_record_key")]
    pub record_key: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        let path = env::var("PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_path());

        Self {
            path,
            record_key: default_record_key(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            record_key: default_record_key(),
        }
    }
}
