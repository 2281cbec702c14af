mod settings;

pub use settings::{GoogleSettings, LimitSettings, ServerSettings, Settings, StorageSettings};
