use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use futures::future;

use crate::application::ports::{ArtifactStore, SpeechSynthesizer};
use crate::domain::{ArtifactPath, AudioArtifact, Language, VoiceCatalog};

use super::TranslationOutcome;

/// Per-language result of the synthesis stage. Translated text survives a
/// synthesis failure; only the audio artifact is lost.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutcome {
    Synthesized(AudioArtifact),
    Failed(String),
}

impl SynthesisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Synthesized(_))
    }

    pub fn artifact(&self) -> Option<&AudioArtifact> {
        match self {
            Self::Synthesized(artifact) => Some(artifact),
            Self::Failed(_) => None,
        }
    }
}

pub struct SynthesisFanOut<S>
where
    S: SpeechSynthesizer,
{
    synthesizer: Arc<S>,
    artifact_store: Arc<dyn ArtifactStore>,
    voices: VoiceCatalog,
}

impl<S> SynthesisFanOut<S>
where
    S: SpeechSynthesizer,
{
    pub fn new(
        synthesizer: Arc<S>,
        artifact_store: Arc<dyn ArtifactStore>,
        voices: VoiceCatalog,
    ) -> Self {
        Self {
            synthesizer,
            artifact_store,
            voices,
        }
    }

    /// Synthesize audio for every language that translated successfully.
    /// Languages whose translation failed get no synthesis call but keep an
    /// entry naming the upstream failure, so the map is keyed identically to
    /// the translation map.
    pub async fn synthesize_all(
        &self,
        translations: &BTreeMap<Language, TranslationOutcome>,
    ) -> BTreeMap<Language, SynthesisOutcome> {
        if translations.is_empty() {
            return BTreeMap::new();
        }

        tracing::debug!(languages = translations.len(), "Dispatching synthesis fan-out");

        let calls = translations.iter().map(|(&language, translation)| {
            async move {
                let outcome = match translation {
                    TranslationOutcome::Translated(text) => {
                        self.synthesize_one(language, text).await
                    }
                    TranslationOutcome::Failed(reason) => {
                        SynthesisOutcome::Failed(format!("translation failed: {}", reason))
                    }
                };
                (language, outcome)
            }
        });

        future::join_all(calls).await.into_iter().collect()
    }

    async fn synthesize_one(&self, language: Language, text: &str) -> SynthesisOutcome {
        let voice = match self.voices.voice_for(language) {
            Some(v) => v,
            None => {
                tracing::warn!(language = %language, "No synthesis voice configured");
                return SynthesisOutcome::Failed(format!(
                    "no synthesis voice configured for {}",
                    language
                ));
            }
        };

        let audio = match self.synthesizer.synthesize(text, language, voice).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(language = %language, error = %e, "Synthesis failed");
                return SynthesisOutcome::Failed(e.to_string());
            }
        };

        let path = ArtifactPath::generate(language);
        match self
            .artifact_store
            .store(&path, Bytes::from(audio))
            .await
        {
            Ok(size_bytes) => {
                tracing::info!(
                    language = %language,
                    artifact = %path,
                    size_bytes,
                    "Audio artifact stored"
                );
                SynthesisOutcome::Synthesized(AudioArtifact::new(&path, size_bytes))
            }
            Err(e) => {
                tracing::warn!(language = %language, error = %e, "Failed to store audio artifact");
                SynthesisOutcome::Failed(format!("artifact store: {}", e))
            }
        }
    }
}
