mod artifact;
mod audio_asset;
mod audio_format;
mod language;
mod transcript;
mod voice_catalog;

pub use artifact::{ArtifactPath, AudioArtifact};
pub use audio_asset::AudioAsset;
pub use audio_format::{AudioEncoding, AudioFormat};
pub use language::Language;
pub use transcript::Transcript;
pub use voice_catalog::VoiceCatalog;
