use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, TranscriptionError, Translator};
use crate::domain::{AudioAsset, Language, Transcript};

use super::{
    SynthesisFanOut, SynthesisOutcome, TranscriptionDispatchError, TranscriptionDispatcher,
    TranslationFanOut, TranslationOutcome, TranslationRequest,
};

/// Aggregated result of one pipeline run. `success` is true iff
/// transcription (when required) succeeded and at least one target language
/// translated; per-language failures stay visible in the outcome maps.
#[derive(Debug)]
pub struct PipelineResult {
    pub transcription: Option<Transcript>,
    pub translations: BTreeMap<Language, TranslationOutcome>,
    pub audio: BTreeMap<Language, SynthesisOutcome>,
    pub success: bool,
    pub elapsed: Duration,
    pub timestamp: DateTime<Utc>,
}

pub struct PipelineService<R, T, S>
where
    R: SpeechRecognizer,
    T: Translator,
    S: SpeechSynthesizer,
{
    transcription: TranscriptionDispatcher<R>,
    translation: TranslationFanOut<T>,
    synthesis: SynthesisFanOut<S>,
    max_asset_bytes: u64,
}

impl<R, T, S> PipelineService<R, T, S>
where
    R: SpeechRecognizer,
    T: Translator,
    S: SpeechSynthesizer,
{
    pub fn new(
        transcription: TranscriptionDispatcher<R>,
        translation: TranslationFanOut<T>,
        synthesis: SynthesisFanOut<S>,
        max_asset_bytes: u64,
    ) -> Self {
        Self {
            transcription,
            translation,
            synthesis,
            max_asset_bytes,
        }
    }

    /// Voice mode: transcribe, then fan out translation and synthesis.
    pub async fn process_voice(
        &self,
        asset: AudioAsset,
        source_language: Option<Language>,
        target_languages: Vec<Language>,
    ) -> Result<PipelineResult, PipelineError> {
        let started = Instant::now();

        self.validate_asset(&asset)?;

        tracing::info!(
            filename = %asset.filename,
            size_bytes = asset.size_bytes(),
            source = source_language.map(|l| l.name()).unwrap_or("auto"),
            targets = target_languages.len(),
            "Voice pipeline started"
        );

        let transcript = self
            .transcription
            .transcribe(&asset, source_language)
            .await
            .map_err(PipelineError::from)?;

        let request = TranslationRequest::new(
            transcript.text.clone(),
            transcript.language,
            target_languages,
        );
        let translations = self.translation.translate_all(&request).await;
        let audio = self.synthesis.synthesize_all(&translations).await;

        Ok(self.finish(Some(transcript), translations, audio, started))
    }

    /// Text mode: no transcription; translation fan-out, synthesis optional.
    pub async fn process_text(
        &self,
        text: &str,
        source_language: Language,
        target_languages: Vec<Language>,
        generate_audio: bool,
    ) -> Result<PipelineResult, PipelineError> {
        let started = Instant::now();

        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        tracing::info!(
            source = %source_language,
            targets = target_languages.len(),
            generate_audio,
            "Text pipeline started"
        );

        let request = TranslationRequest::new(text, source_language, target_languages);
        let translations = self.translation.translate_all(&request).await;
        let audio = if generate_audio {
            self.synthesis.synthesize_all(&translations).await
        } else {
            BTreeMap::new()
        };

        Ok(self.finish(None, translations, audio, started))
    }

    /// Transcription only, for the speech-to-text endpoint.
    pub async fn transcribe_only(
        &self,
        asset: AudioAsset,
        source_language: Option<Language>,
    ) -> Result<Transcript, PipelineError> {
        self.validate_asset(&asset)?;
        self.transcription
            .transcribe(&asset, source_language)
            .await
            .map_err(PipelineError::from)
    }

    fn validate_asset(&self, asset: &AudioAsset) -> Result<(), PipelineError> {
        if asset.data.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        if asset.size_bytes() > self.max_asset_bytes {
            return Err(PipelineError::AssetTooLarge {
                size_bytes: asset.size_bytes(),
                max_bytes: self.max_asset_bytes,
            });
        }
        if asset.format().is_none() {
            let ext = asset
                .filename
                .rsplit_once('.')
                .map(|(_, e)| e.to_string())
                .unwrap_or_else(|| asset.filename.clone());
            return Err(PipelineError::UnsupportedFormat(ext));
        }
        Ok(())
    }

    fn finish(
        &self,
        transcription: Option<Transcript>,
        translations: BTreeMap<Language, TranslationOutcome>,
        audio: BTreeMap<Language, SynthesisOutcome>,
        started: Instant,
    ) -> PipelineResult {
        let success = translations.values().any(TranslationOutcome::is_success);
        let elapsed = started.elapsed();

        tracing::info!(
            success,
            translated = translations.values().filter(|o| o.is_success()).count(),
            synthesized = audio.values().filter(|o| o.is_success()).count(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Pipeline completed"
        );

        PipelineResult {
            transcription,
            translations,
            audio,
            success,
            elapsed,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("audio file too large: {size_bytes} bytes (max {max_bytes})")]
    AssetTooLarge { size_bytes: u64, max_bytes: u64 },
    #[error("empty input")]
    EmptyInput,
    #[error("no speech detected")]
    NoSpeechDetected,
    #[error("transcription service: {0}")]
    Transcription(TranscriptionError),
}

impl From<TranscriptionDispatchError> for PipelineError {
    fn from(e: TranscriptionDispatchError) -> Self {
        match e {
            TranscriptionDispatchError::UnsupportedFormat(ext) => Self::UnsupportedFormat(ext),
            TranscriptionDispatchError::NoSpeechDetected => Self::NoSpeechDetected,
            TranscriptionDispatchError::Service(inner) => Self::Transcription(inner),
        }
    }
}
