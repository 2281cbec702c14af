use async_trait::async_trait;

use crate::domain::Language;

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, TranslationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
