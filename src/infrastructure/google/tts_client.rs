use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SpeechSynthesizer, SynthesisError};
use crate::domain::Language;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Google Cloud Text-to-Speech REST client (`text:synthesize`, API key auth).
/// Always requests MP3 output at neutral pitch and rate.
pub struct GoogleTtsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTtsClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let endpoint = format!("{}/v1/text:synthesize", base_url.trim_end_matches('/'));
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'static str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    pitch: f32,
    speaking_rate: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: &str,
    ) -> Result<Vec<u8>, SynthesisError> {
        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: language.synthesis_code(),
                name: voice,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                pitch: 0.0,
                speaking_rate: 1.0,
            },
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            language = language.synthesis_code(),
            voice,
            chars = text.len(),
            "Sending text to speech synthesis service"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("parse response: {}", e)))?;

        if result.audio_content.is_empty() {
            return Err(SynthesisError::InvalidResponse(
                "no audio content in response".to_string(),
            ));
        }

        let audio = base64::engine::general_purpose::STANDARD
            .decode(result.audio_content)
            .map_err(|e| SynthesisError::InvalidResponse(format!("decode audio: {}", e)))?;

        tracing::info!(
            language = language.synthesis_code(),
            voice,
            audio_bytes = audio.len(),
            "Speech synthesis completed"
        );

        Ok(audio)
    }
}
