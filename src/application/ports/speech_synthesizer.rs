use async_trait::async_trait;

use crate::domain::Language;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the given voice, returning encoded audio bytes.
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: &str,
    ) -> Result<Vec<u8>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
