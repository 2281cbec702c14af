use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SpeechRecognition, SpeechRecognizer, TranscriptionError};
use crate::domain::{AudioEncoding, Language};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Google Cloud Speech-to-Text REST client (`speech:recognize`, API key auth).
pub struct GoogleSpeechClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleSpeechClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let endpoint = format!("{}/v1/speech:recognize", base_url.trim_end_matches('/'));
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: &'static str,
    language_code: &'static str,
    enable_automatic_punctuation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rate_hertz: Option<u32>,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(Deserialize)]
struct RecognizeAlternative {
    transcript: String,
    #[serde(default)]
    confidence: f32,
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechClient {
    async fn recognize(
        &self,
        audio: &[u8],
        encoding: AudioEncoding,
        sample_rate_hertz: Option<u32>,
        language: Language,
    ) -> Result<Option<SpeechRecognition>, TranscriptionError> {
        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: encoding.as_api_str(),
                language_code: language.speech_code(),
                enable_automatic_punctuation: true,
                sample_rate_hertz,
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(audio),
            },
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            language = language.speech_code(),
            encoding = encoding.as_api_str(),
            audio_bytes = audio.len(),
            "Sending audio to speech recognition service"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        let Some(alternative) = result
            .results
            .into_iter()
            .next()
            .and_then(|r| r.alternatives.into_iter().next())
        else {
            tracing::debug!(language = language.speech_code(), "Recognizer returned no results");
            return Ok(None);
        };

        tracing::info!(
            language = language.speech_code(),
            confidence = alternative.confidence,
            chars = alternative.transcript.len(),
            "Speech recognition completed"
        );

        Ok(Some(SpeechRecognition {
            text: alternative.transcript.trim().to_string(),
            confidence: alternative.confidence,
        }))
    }
}
