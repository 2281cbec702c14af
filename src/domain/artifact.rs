use std::fmt;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::Language;

/// Storage key of a generated audio artifact. Generated names combine a
/// timestamp, the language and a random suffix so concurrent requests never
/// overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    pub fn generate(language: Language) -> Self {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "audio_{}_{}_{}.mp3",
            language.name(),
            timestamp,
            &random[..8]
        ))
    }

    pub fn from_filename(filename: impl Into<String>) -> Self {
        Self(filename.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a stored artifact returned to callers; the bytes themselves
/// are fetched separately through the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioArtifact {
    pub filename: String,
    pub size_bytes: u64,
}

impl AudioArtifact {
    pub fn new(path: &ArtifactPath, size_bytes: u64) -> Self {
        Self {
            filename: path.as_str().to_string(),
            size_bytes,
        }
    }
}
