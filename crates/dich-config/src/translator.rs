use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://clients5.google.com/translate_a/t".to_string()
}

fn default_client() -> String {
    "dict-chrome-ex".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Value of the `client` query parameter
    #[serde(default = "default_client")]
    pub client: String,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_url = env::var("TRANSLATE_API_URL").unwrap_or_else(|_| default_api_url());
        let client = env::var("TRANSLATE_CLIENT").unwrap_or_else(|_| default_client());

        Self { api_url, client }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            client: default_client(),
        }
    }
}
