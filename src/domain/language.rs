use std::fmt;

use serde::Serialize;

/// Languages handled by the pipeline. Declaration order doubles as the
/// tie-break order for the transcription auto-detect sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Chinese,
    English,
    Bangla,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Chinese, Language::English, Language::Bangla];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "zh" | "zh-cn" | "chinese" => Some(Self::Chinese),
            "en" | "en-us" | "english" => Some(Self::English),
            "bn" | "bn-in" | "bangla" | "bengali" => Some(Self::Bangla),
            _ => None,
        }
    }

    /// Tag accepted by the translation service.
    pub fn translation_code(&self) -> &'static str {
        match self {
            Self::Chinese => "zh-CN",
            Self::English => "en",
            Self::Bangla => "bn",
        }
    }

    /// Tag accepted by the speech recognition service.
    pub fn speech_code(&self) -> &'static str {
        match self {
            Self::Chinese => "zh-CN",
            Self::English => "en-US",
            Self::Bangla => "bn-IN",
        }
    }

    /// Tag accepted by the speech synthesis service.
    pub fn synthesis_code(&self) -> &'static str {
        match self {
            Self::Chinese => "cmn-CN",
            Self::English => "en-US",
            Self::Bangla => "bn-IN",
        }
    }

    /// Lowercase name used as the key in outcome maps and artifact filenames.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chinese => "chinese",
            Self::English => "english",
            Self::Bangla => "bangla",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
