mod artifact_store;
mod speech_recognizer;
mod speech_synthesizer;
mod translator;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use speech_recognizer::{SpeechRecognition, SpeechRecognizer, TranscriptionError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use translator::{TranslationError, Translator};
