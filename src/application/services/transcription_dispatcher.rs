use std::sync::Arc;
use std::time::Instant;

use futures::future;

use crate::application::ports::{SpeechRecognition, SpeechRecognizer, TranscriptionError};
use crate::domain::{AudioAsset, Language, Transcript};

/// Candidate languages tried when no source language is declared. The
/// declaration order breaks confidence ties.
const AUTO_DETECT_CANDIDATES: [Language; 3] = Language::ALL;

pub struct TranscriptionDispatcher<R>
where
    R: SpeechRecognizer,
{
    recognizer: Arc<R>,
}

impl<R> TranscriptionDispatcher<R>
where
    R: SpeechRecognizer,
{
    pub fn new(recognizer: Arc<R>) -> Self {
        Self { recognizer }
    }

    /// Transcribe `asset`, either with the declared source language or by
    /// sweeping every candidate language and keeping the highest-confidence
    /// non-empty hypothesis.
    pub async fn transcribe(
        &self,
        asset: &AudioAsset,
        language: Option<Language>,
    ) -> Result<Transcript, TranscriptionDispatchError> {
        let format = asset.format().ok_or_else(|| {
            TranscriptionDispatchError::UnsupportedFormat(extension_of(&asset.filename))
        })?;

        let encoding = format.encoding();
        let sample_rate = format.sample_rate_hint();
        let started = Instant::now();

        match language {
            Some(lang) => {
                tracing::debug!(language = %lang, encoding = encoding.as_api_str(), "Transcribing with declared language");

                let recognition = self
                    .recognizer
                    .recognize(&asset.data, encoding, sample_rate, lang)
                    .await
                    .map_err(TranscriptionDispatchError::Service)?;

                match recognition.filter(|r| !r.text.trim().is_empty()) {
                    Some(r) => Ok(Transcript {
                        text: r.text,
                        confidence: r.confidence,
                        language: lang,
                        duration: started.elapsed(),
                    }),
                    None => Err(TranscriptionDispatchError::NoSpeechDetected),
                }
            }
            None => {
                tracing::debug!(
                    candidates = AUTO_DETECT_CANDIDATES.len(),
                    "Transcribing with language auto-detect sweep"
                );

                let attempts = AUTO_DETECT_CANDIDATES.map(|candidate| {
                    let recognizer = Arc::clone(&self.recognizer);
                    let data = asset.data.clone();
                    async move {
                        let result = recognizer
                            .recognize(&data, encoding, sample_rate, candidate)
                            .await;
                        (candidate, result)
                    }
                });

                let mut best: Option<(Language, SpeechRecognition)> = None;

                for (candidate, result) in future::join_all(attempts).await {
                    let recognition = match result {
                        Ok(Some(r)) if !r.text.trim().is_empty() => r,
                        Ok(_) => {
                            tracing::debug!(language = %candidate, "Candidate returned no speech");
                            continue;
                        }
                        Err(e) => {
                            tracing::warn!(language = %candidate, error = %e, "Candidate transcription failed");
                            continue;
                        }
                    };

                    // Strictly greater keeps the earlier candidate on ties.
                    let replace = best
                        .as_ref()
                        .map(|(_, current)| recognition.confidence > current.confidence)
                        .unwrap_or(true);
                    if replace {
                        best = Some((candidate, recognition));
                    }
                }

                match best {
                    Some((detected, recognition)) => {
                        tracing::info!(
                            language = %detected,
                            confidence = recognition.confidence,
                            "Auto-detect sweep selected language"
                        );
                        Ok(Transcript {
                            text: recognition.text,
                            confidence: recognition.confidence,
                            language: detected,
                            duration: started.elapsed(),
                        })
                    }
                    None => Err(TranscriptionDispatchError::NoSpeechDetected),
                }
            }
        }
    }
}

fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_else(|| filename.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionDispatchError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("no speech detected")]
    NoSpeechDetected,
    #[error("transcription service: {0}")]
    Service(TranscriptionError),
}
