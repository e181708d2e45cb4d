use std::time::Duration;

use async_trait::async_trait;
use dich_types::is_auto;

use crate::{ProviderMetadata, TranslateError, Translation, TranslationRequest, Translator};

/// Client for the keyless dictionary-extension translate endpoint
#[derive(Clone)]
pub struct DictTranslator {
    client: reqwest::Client,
    api_url: String,
    client_name: String,
}

impl DictTranslator {
    pub fn new(
        api_url: String,
        client_name: String,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dich/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url,
            client_name,
        })
    }

    fn build_request(&self, request: &TranslationRequest) -> reqwest::RequestBuilder {
        let params = [
            ("client", self.client_name.as_str()),
            ("sl", request.source_language.as_str()),
            ("tl", request.target_language.as_str()),
            ("q", request.text.as_str()),
        ];

        self.client.get(&self.api_url).query(&params)
    }
}

#[async_trait]
impl Translator for DictTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        tracing::debug!(
            id = request.id,
            sl = %request.source_language,
            tl = %request.target_language,
            "sending translate request"
        );

        let response = self
            .build_request(request)
            .send()
            .await?
            .error_for_status()?;

        let json: serde_json::Value = response.json().await?;

        parse_response(&json, is_auto(&request.source_language))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Dictionary".to_string(),
        }
    }
}

/// Explicit source: `["text"]`. Auto source: `[["text", "detected"]]`.
pub fn parse_response(
    json: &serde_json::Value,
    auto_detect: bool,
) -> Result<Translation, TranslateError> {
    let first = json
        .get(0)
        .ok_or_else(|| TranslateError::MalformedResponse("empty response".to_string()))?;

    if let Some(text) = first.as_str() {
        return Ok(Translation {
            text: text.to_string(),
            detected: None,
        });
    }

    let text = first
        .get(0)
        .and_then(|t| t.as_str())
        .ok_or_else(|| TranslateError::MalformedResponse("no translation in response".to_string()))?;

    let detected = if auto_detect {
        first
            .get(1)
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    Ok(Translation {
        text: text.to_string(),
        detected,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn explicit_source_yields_plain_text() {
        let translation = parse_response(&json!(["xin chào"]), false).unwrap();
        assert_eq!(translation.text, "xin chào");
        assert_eq!(translation.detected, None);
    }

    #[test]
    fn auto_source_yields_detected_language() {
        let translation = parse_response(&json!([["xin chào", "en"]]), true).unwrap();
        assert_eq!(translation.text, "xin chào");
        assert_eq!(translation.detected.as_deref(), Some("en"));
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        assert!(matches!(
            parse_response(&json!([]), true),
            Err(TranslateError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(&json!({"error": "nope"}), false),
            Err(TranslateError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(&json!([[42]]), true),
            Err(TranslateError::MalformedResponse(_))
        ));
    }

    #[test]
    fn query_is_url_encoded() {
        let translator = DictTranslator::new(
            "https://example.invalid/translate_a/t".to_string(),
            "dict-chrome-ex".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        let request = TranslationRequest {
            id: 1,
            text: "hello world & more".to_string(),
            source_language: "auto".to_string(),
            target_language: "vi".to_string(),
        };

        let built = translator.build_request(&request).build().unwrap();
        assert_eq!(built.method(), reqwest::Method::GET);

        let pairs: Vec<(String, String)> = built
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("sl".to_string(), "auto".to_string())));
        assert!(pairs.contains(&("tl".to_string(), "vi".to_string())));
        assert!(pairs.contains(&("q".to_string(), "hello world & more".to_string())));
        assert!(built.url().query().unwrap().contains("q=hello+world+%26+more"));
    }
}
