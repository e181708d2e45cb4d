pub mod dict;

pub use dich_types::LanguageCode;
pub use dict::DictTranslator;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language.
    ///
    /// When the source is the auto-detect sentinel, providers report the
    /// detected language in [`Translation::detected`].
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// One translate call. `id` only exists to tell superseded results apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub id: u64,
    pub text: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub detected: Option<LanguageCode>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("{0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),
}

impl TranslateError {
    /// No response arrived, or the client gave up waiting
    pub fn is_network(&self) -> bool {
        matches!(self, TranslateError::Network(_) | TranslateError::Timeout)
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else if let Some(status) = e.status() {
            TranslateError::Api(format!(
                "Request failed with status code {}",
                status.as_u16()
            ))
        } else if e.is_decode() {
            TranslateError::MalformedResponse(e.to_string())
        } else {
            TranslateError::Network(e.to_string())
        }
    }
}
