use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use voxlate::application::ports::{
    ArtifactStore, ArtifactStoreError, SpeechSynthesizer, SynthesisError,
};
use voxlate::application::services::{SynthesisFanOut, SynthesisOutcome, TranslationOutcome};
use voxlate::domain::{ArtifactPath, Language, VoiceCatalog};

struct ScriptedSynthesizer {
    failing: Vec<Language>,
    calls: Mutex<Vec<Language>>,
}

impl ScriptedSynthesizer {
    fn new(failing: Vec<Language>) -> Self {
        Self {
            failing,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Language> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        _voice: &str,
    ) -> Result<Vec<u8>, SynthesisError> {
        self.calls.lock().unwrap().push(language);
        if self.failing.contains(&language) {
            return Err(SynthesisError::ApiRequestFailed("service down".to_string()));
        }
        Ok(format!("mp3:{}", text).into_bytes())
    }
}

struct InMemoryArtifactStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: bool,
}

impl InMemoryArtifactStore {
    fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_writes: false,
        }
    }

    fn failing() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    fn stored_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn store(&self, path: &ArtifactPath, data: Bytes) -> Result<u64, ArtifactStoreError> {
        if self.fail_writes {
            return Err(ArtifactStoreError::WriteFailed("disk full".to_string()));
        }
        let size = data.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), data.to_vec());
        Ok(size)
    }

    async fn fetch(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ArtifactStoreError::NotFound(path.as_str().to_string()))
    }

    async fn delete(&self, path: &ArtifactPath) -> Result<(), ArtifactStoreError> {
        self.objects.lock().unwrap().remove(path.as_str());
        Ok(())
    }
}

fn translated(text: &str) -> TranslationOutcome {
    TranslationOutcome::Translated(text.to_string())
}

#[tokio::test]
async fn given_translation_successes_when_synthesizing_then_artifacts_are_stored() {
    let store = Arc::new(InMemoryArtifactStore::new());
    let fanout = SynthesisFanOut::new(
        Arc::new(ScriptedSynthesizer::new(vec![])),
        Arc::clone(&store) as Arc<dyn ArtifactStore>,
        VoiceCatalog::default(),
    );
    let translations = BTreeMap::from([
        (Language::English, translated("hello world")),
        (Language::Bangla, translated("হ্যালো বিশ্ব")),
    ]);

    let outcomes = fanout.synthesize_all(&translations).await;

    assert_eq!(outcomes.len(), 2);
    for (language, outcome) in &outcomes {
        let artifact = outcome
            .artifact()
            .unwrap_or_else(|| panic!("expected artifact for {}", language));
        assert!(artifact.size_bytes > 0);
        assert!(artifact.filename.ends_with(".mp3"));
    }
    assert_eq!(store.stored_count(), 2);
}

#[tokio::test]
async fn given_upstream_translation_failure_when_synthesizing_then_entry_names_upstream_reason() {
    let synthesizer = Arc::new(ScriptedSynthesizer::new(vec![]));
    let fanout = SynthesisFanOut::new(
        Arc::clone(&synthesizer),
        Arc::new(InMemoryArtifactStore::new()) as Arc<dyn ArtifactStore>,
        VoiceCatalog::default(),
    );
    let translations = BTreeMap::from([
        (Language::English, translated("hello")),
        (
            Language::Bangla,
            TranslationOutcome::Failed("quota exceeded".to_string()),
        ),
    ]);

    let outcomes = fanout.synthesize_all(&translations).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.get(&Language::English).unwrap().is_success());
    match outcomes.get(&Language::Bangla).unwrap() {
        SynthesisOutcome::Failed(reason) => {
            assert!(reason.contains("translation failed"));
            assert!(reason.contains("quota exceeded"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    // No wasted synthesis call for the failed translation.
    assert_eq!(synthesizer.calls(), vec![Language::English]);
}

#[tokio::test]
async fn given_language_without_voice_when_synthesizing_then_only_that_entry_fails() {
    let synthesizer = Arc::new(ScriptedSynthesizer::new(vec![]));
    let catalog = VoiceCatalog::new(BTreeMap::from([(
        Language::English,
        "en-US-Neural2-C".to_string(),
    )]));
    let fanout = SynthesisFanOut::new(
        Arc::clone(&synthesizer),
        Arc::new(InMemoryArtifactStore::new()) as Arc<dyn ArtifactStore>,
        catalog,
    );
    let translations = BTreeMap::from([
        (Language::English, translated("hello")),
        (Language::Bangla, translated("হ্যালো")),
    ]);

    let outcomes = fanout.synthesize_all(&translations).await;

    assert!(outcomes.get(&Language::English).unwrap().is_success());
    match outcomes.get(&Language::Bangla).unwrap() {
        SynthesisOutcome::Failed(reason) => assert!(reason.contains("no synthesis voice")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(synthesizer.calls(), vec![Language::English]);
}

#[tokio::test]
async fn given_synthesizer_error_when_synthesizing_then_siblings_are_unaffected() {
    let fanout = SynthesisFanOut::new(
        Arc::new(ScriptedSynthesizer::new(vec![Language::Bangla])),
        Arc::new(InMemoryArtifactStore::new()) as Arc<dyn ArtifactStore>,
        VoiceCatalog::default(),
    );
    let translations = BTreeMap::from([
        (Language::English, translated("hello")),
        (Language::Bangla, translated("হ্যালো")),
    ]);

    let outcomes = fanout.synthesize_all(&translations).await;

    assert!(outcomes.get(&Language::English).unwrap().is_success());
    assert!(!outcomes.get(&Language::Bangla).unwrap().is_success());
}

#[tokio::test]
async fn given_store_failure_when_synthesizing_then_entry_reports_store_error() {
    let fanout = SynthesisFanOut::new(
        Arc::new(ScriptedSynthesizer::new(vec![])),
        Arc::new(InMemoryArtifactStore::failing()) as Arc<dyn ArtifactStore>,
        VoiceCatalog::default(),
    );
    let translations = BTreeMap::from([(Language::English, translated("hello"))]);

    let outcomes = fanout.synthesize_all(&translations).await;

    match outcomes.get(&Language::English).unwrap() {
        SynthesisOutcome::Failed(reason) => assert!(reason.contains("artifact store")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn given_empty_translation_map_when_synthesizing_then_map_is_empty() {
    let synthesizer = Arc::new(ScriptedSynthesizer::new(vec![]));
    let fanout = SynthesisFanOut::new(
        Arc::clone(&synthesizer),
        Arc::new(InMemoryArtifactStore::new()) as Arc<dyn ArtifactStore>,
        VoiceCatalog::default(),
    );

    let outcomes = fanout.synthesize_all(&BTreeMap::new()).await;

    assert!(outcomes.is_empty());
    assert!(synthesizer.calls().is_empty());
}
