use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{TranslationError, Translator};
use crate::domain::Language;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Cloud Translation v2 REST client (API key auth, query parameters).
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslateClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let endpoint = format!(
            "{}/language/translate/v2",
            base_url.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, TranslationError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            source = source.translation_code(),
            target = target.translation_code(),
            "Sending text to translation service"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", text),
                ("source", source.translation_code()),
                ("target", target.translation_code()),
                ("format", "text"),
            ])
            .send()
            .await
            .map_err(|e| TranslationError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranslationError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(format!("parse response: {}", e)))?;

        let translated = result
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                TranslationError::InvalidResponse("no translations in response".to_string())
            })?;

        tracing::info!(
            target = target.translation_code(),
            chars = translated.len(),
            "Translation completed"
        );

        Ok(translated)
    }
}
