use std::sync::Arc;

use crate::application::ports::{ArtifactStore, SpeechRecognizer, SpeechSynthesizer, Translator};
use crate::application::services::PipelineService;
use crate::presentation::config::Settings;

pub struct AppState<R, T, S>
where
    R: SpeechRecognizer,
    T: Translator,
    S: SpeechSynthesizer,
{
    pub pipeline: Arc<PipelineService<R, T, S>>,
    pub artifact_store: Arc<dyn ArtifactStore>,
    pub settings: Settings,
}

impl<R, T, S> Clone for AppState<R, T, S>
where
    R: SpeechRecognizer,
    T: Translator,
    S: SpeechSynthesizer,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            artifact_store: Arc::clone(&self.artifact_store),
            settings: self.settings.clone(),
        }
    }
}
