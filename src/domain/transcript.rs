use std::time::Duration;

use super::Language;

/// Result of a successful transcription. Immutable once produced.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub text: String,
    pub confidence: f32,
    pub language: Language,
    pub duration: Duration,
}
