use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use voxlate::application::ports::{SpeechRecognition, SpeechRecognizer, TranscriptionError};
use voxlate::application::services::{TranscriptionDispatchError, TranscriptionDispatcher};
use voxlate::domain::{AudioAsset, AudioEncoding, Language};

/// Recognizer returning a scripted result per language, recording the
/// languages it was called with.
struct ScriptedRecognizer {
    results: BTreeMap<Language, Result<Option<SpeechRecognition>, String>>,
    calls: Mutex<Vec<Language>>,
}

impl ScriptedRecognizer {
    fn new(results: BTreeMap<Language, Result<Option<SpeechRecognition>, String>>) -> Self {
        Self {
            results,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Language> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(
        &self,
        _audio: &[u8],
        _encoding: AudioEncoding,
        _sample_rate_hertz: Option<u32>,
        language: Language,
    ) -> Result<Option<SpeechRecognition>, TranscriptionError> {
        self.calls.lock().unwrap().push(language);
        match self.results.get(&language) {
            Some(Ok(recognition)) => Ok(recognition.clone()),
            Some(Err(reason)) => Err(TranscriptionError::ApiRequestFailed(reason.clone())),
            None => Ok(None),
        }
    }
}

fn hit(text: &str, confidence: f32) -> Result<Option<SpeechRecognition>, String> {
    Ok(Some(SpeechRecognition {
        text: text.to_string(),
        confidence,
    }))
}

fn wav_asset() -> AudioAsset {
    AudioAsset::new("speech.wav", Bytes::from_static(b"fake pcm audio"))
}

#[tokio::test]
async fn given_declared_language_when_transcribing_then_single_call_is_made() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::from([(
        Language::Chinese,
        hit("你好世界", 0.93),
    )])));
    let dispatcher = TranscriptionDispatcher::new(Arc::clone(&recognizer));

    let transcript = dispatcher
        .transcribe(&wav_asset(), Some(Language::Chinese))
        .await
        .unwrap();

    assert_eq!(transcript.text, "你好世界");
    assert_eq!(transcript.language, Language::Chinese);
    assert_eq!(recognizer.calls(), vec![Language::Chinese]);
}

#[tokio::test]
async fn given_declared_language_and_empty_transcript_when_transcribing_then_no_speech_detected() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::from([(
        Language::English,
        hit("   ", 0.9),
    )])));
    let dispatcher = TranscriptionDispatcher::new(recognizer);

    let result = dispatcher
        .transcribe(&wav_asset(), Some(Language::English))
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionDispatchError::NoSpeechDetected)
    ));
}

#[tokio::test]
async fn given_declared_language_and_service_error_when_transcribing_then_error_propagates() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::from([(
        Language::English,
        Err("quota exceeded".to_string()),
    )])));
    let dispatcher = TranscriptionDispatcher::new(recognizer);

    let result = dispatcher
        .transcribe(&wav_asset(), Some(Language::English))
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionDispatchError::Service(_))
    ));
}

#[tokio::test]
async fn given_no_language_when_transcribing_then_sweep_selects_highest_confidence() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::from([
        (Language::Chinese, hit("你好", 0.41)),
        (Language::English, hit("hello world", 0.92)),
        (Language::Bangla, hit("হ্যালো", 0.68)),
    ])));
    let dispatcher = TranscriptionDispatcher::new(Arc::clone(&recognizer));

    let transcript = dispatcher.transcribe(&wav_asset(), None).await.unwrap();

    assert_eq!(transcript.language, Language::English);
    assert_eq!(transcript.text, "hello world");
    assert_eq!(recognizer.calls().len(), 3);
}

#[tokio::test]
async fn given_tied_confidence_when_sweeping_then_declaration_order_breaks_tie() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::from([
        (Language::Chinese, hit("你好", 0.8)),
        (Language::English, hit("hello", 0.8)),
        (Language::Bangla, hit("হ্যালো", 0.8)),
    ])));
    let dispatcher = TranscriptionDispatcher::new(recognizer);

    let transcript = dispatcher.transcribe(&wav_asset(), None).await.unwrap();

    assert_eq!(transcript.language, Language::Chinese);
}

#[tokio::test]
async fn given_failed_candidates_when_sweeping_then_surviving_candidate_wins() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::from([
        (Language::Chinese, Err("network error".to_string())),
        (Language::English, Ok(None)),
        (Language::Bangla, hit("হ্যালো বিশ্ব", 0.55)),
    ])));
    let dispatcher = TranscriptionDispatcher::new(recognizer);

    let transcript = dispatcher.transcribe(&wav_asset(), None).await.unwrap();

    assert_eq!(transcript.language, Language::Bangla);
}

#[tokio::test]
async fn given_all_candidates_empty_or_failed_when_sweeping_then_no_speech_detected() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::from([
        (Language::Chinese, Ok(None)),
        (Language::English, Err("timeout".to_string())),
        (Language::Bangla, hit("", 0.9)),
    ])));
    let dispatcher = TranscriptionDispatcher::new(Arc::clone(&recognizer));

    let result = dispatcher.transcribe(&wav_asset(), None).await;

    assert!(matches!(
        result,
        Err(TranscriptionDispatchError::NoSpeechDetected)
    ));
    assert_eq!(recognizer.calls().len(), 3);
}

#[tokio::test]
async fn given_same_input_when_sweeping_twice_then_selection_is_deterministic() {
    let results = BTreeMap::from([
        (Language::Chinese, hit("你好", 0.7)),
        (Language::English, hit("hello", 0.7)),
        (Language::Bangla, hit("হ্যালো", 0.3)),
    ]);

    for _ in 0..2 {
        let recognizer = Arc::new(ScriptedRecognizer::new(results.clone()));
        let dispatcher = TranscriptionDispatcher::new(recognizer);
        let transcript = dispatcher.transcribe(&wav_asset(), None).await.unwrap();
        assert_eq!(transcript.language, Language::Chinese);
    }
}

#[tokio::test]
async fn given_unsupported_extension_when_transcribing_then_no_remote_call_is_made() {
    let recognizer = Arc::new(ScriptedRecognizer::new(BTreeMap::new()));
    let dispatcher = TranscriptionDispatcher::new(Arc::clone(&recognizer));
    let asset = AudioAsset::new("notes.txt", Bytes::from_static(b"not audio"));

    let result = dispatcher.transcribe(&asset, None).await;

    assert!(matches!(
        result,
        Err(TranscriptionDispatchError::UnsupportedFormat(ext)) if ext == "txt"
    ));
    assert!(recognizer.calls().is_empty());
}
