use serde::{Deserialize, Serialize};

fn default_translating_text() -> String {
    "Translating".to_string()
}

fn default_network_error_text() -> String {
    "Network error".to_string()
}

fn default_detected_suffix() -> String {
    "detected".to_string()
}

fn default_output_placeholder() -> String {
    "Translation".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Shown in the output panel while the first translation is pending
    #[serde(default = "default_translating_text")]
    pub translating_text: String,
    #[serde(default = "default_network_error_text")]
    pub network_error_text: String,
    #[serde(default = "default_detected_suffix")]
    pub detected_suffix: String,
    #[serde(default = "default_output_placeholder")]
    pub output_placeholder: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            translating_text: default_translating_text(),
            network_error_text: default_network_error_text(),
            detected_suffix: default_detected_suffix(),
            output_placeholder: default_output_placeholder(),
        }
    }
}
