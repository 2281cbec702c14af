use async_trait::async_trait;

use crate::domain::{AudioEncoding, Language};

/// A single recognition hypothesis returned by the speech service.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRecognition {
    pub text: String,
    pub confidence: f32,
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize speech in `audio`. `sample_rate_hertz` of `None` lets the
    /// service detect the rate from the container itself. Returns `Ok(None)`
    /// when the service found no speech at all.
    async fn recognize(
        &self,
        audio: &[u8],
        encoding: AudioEncoding,
        sample_rate_hertz: Option<u32>,
        language: Language,
    ) -> Result<Option<SpeechRecognition>, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
