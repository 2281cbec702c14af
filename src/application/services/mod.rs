mod pipeline_service;
mod synthesis_fanout;
mod transcription_dispatcher;
mod translation_fanout;

pub use pipeline_service::{PipelineError, PipelineResult, PipelineService};
pub use synthesis_fanout::{SynthesisFanOut, SynthesisOutcome};
pub use transcription_dispatcher::{TranscriptionDispatchError, TranscriptionDispatcher};
pub use translation_fanout::{TranslationFanOut, TranslationOutcome, TranslationRequest};
