use bytes::Bytes;

use super::AudioFormat;

/// An uploaded or recorded audio payload. Consumed once by transcription;
/// nothing is persisted after the pipeline completes.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub filename: String,
    pub data: Bytes,
}

impl AudioAsset {
    pub fn new(filename: impl Into<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn format(&self) -> Option<AudioFormat> {
        AudioFormat::from_filename(&self.filename)
    }
}
