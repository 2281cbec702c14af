use std::collections::BTreeMap;

use super::Language;

/// Immutable language → synthesis-voice table, built once at startup and
/// passed into the synthesis stage. Extending language support is a data
/// change here, not an algorithm change.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    voices: BTreeMap<Language, String>,
}

impl VoiceCatalog {
    pub fn new(voices: BTreeMap<Language, String>) -> Self {
        Self { voices }
    }

    pub fn voice_for(&self, language: Language) -> Option<&str> {
        self.voices.get(&language).map(String::as_str)
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        let voices = BTreeMap::from([
            (Language::Chinese, "cmn-CN-Standard-A".to_string()),
            (Language::English, "en-US-Neural2-C".to_string()),
            (Language::Bangla, "bn-IN-Standard-A".to_string()),
        ]);
        Self { voices }
    }
}
