mod speech_client;
mod translate_client;
mod tts_client;

pub use speech_client::GoogleSpeechClient;
pub use translate_client::GoogleTranslateClient;
pub use tts_client::GoogleTtsClient;
