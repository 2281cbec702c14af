/// Audio containers accepted for upload, resolved from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Flac,
    Webm,
    Ogg,
    Mp4,
    M4a,
}

/// Encoding parameter expected by the speech recognition service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    Linear16,
    Mp3,
    Flac,
    WebmOpus,
    OggOpus,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "webm" => Some(Self::Webm),
            "ogg" => Some(Self::Ogg),
            "mp4" => Some(Self::Mp4),
            "m4a" => Some(Self::M4a),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn encoding(&self) -> AudioEncoding {
        match self {
            Self::Wav => AudioEncoding::Linear16,
            Self::Flac => AudioEncoding::Flac,
            // MP4/M4A uploads go through the recognizer's MP3 path.
            Self::Mp3 | Self::Mp4 | Self::M4a => AudioEncoding::Mp3,
            Self::Webm => AudioEncoding::WebmOpus,
            Self::Ogg => AudioEncoding::OggOpus,
        }
    }

    /// Explicit sample rate to declare to the recognizer, or `None` to let
    /// the service detect it. Browser-recorded containers (webm/ogg) and the
    /// MP3 family report variable internal rates; declaring a wrong explicit
    /// rate makes the service mis-decode and return empty results.
    pub fn sample_rate_hint(&self) -> Option<u32> {
        match self.encoding() {
            AudioEncoding::Linear16 | AudioEncoding::Flac => Some(16_000),
            AudioEncoding::Mp3 | AudioEncoding::WebmOpus | AudioEncoding::OggOpus => None,
        }
    }
}

impl AudioEncoding {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Linear16 => "LINEAR16",
            Self::Mp3 => "MP3",
            Self::Flac => "FLAC",
            Self::WebmOpus => "WEBM_OPUS",
            Self::OggOpus => "OGG_OPUS",
        }
    }
}
