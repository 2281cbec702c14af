use serde::Deserialize;

/// Immutable application settings, built once at startup from an optional
/// `config/voxlate.toml` file layered with `VOXLATE__`-prefixed environment
/// variables (e.g. `VOXLATE__SERVER__PORT`). The Google API key may also be
/// supplied bare as `GOOGLE_API_KEY`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub google: GoogleSettings,
    pub storage: StorageSettings,
    pub limits: LimitSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    pub api_key: String,
    pub speech_base_url: String,
    pub translation_base_url: String,
    pub tts_base_url: String,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            speech_base_url: "https://speech.googleapis.com".to_string(),
            translation_base_url: "https://translation.googleapis.com".to_string(),
            tts_base_url: "https://texttospeech.googleapis.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub output_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            output_dir: "outputs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_upload_mb: u64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self { max_upload_mb: 10 }
    }
}

impl LimitSettings {
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut settings: Settings = config::Config::builder()
            .add_source(config::File::with_name("config/voxlate").required(false))
            .add_source(config::Environment::with_prefix("VOXLATE").separator("__"))
            .build()?
            .try_deserialize()?;

        if settings.google.api_key.is_empty() {
            if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
                settings.google.api_key = key;
            }
        }

        Ok(settings)
    }
}
