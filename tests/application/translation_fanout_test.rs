use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use voxlate::application::ports::{TranslationError, Translator};
use voxlate::application::services::{TranslationFanOut, TranslationOutcome, TranslationRequest};
use voxlate::domain::Language;

/// Translator that fails for a configured set of targets and records every
/// (source, target) pair it was asked for.
struct ScriptedTranslator {
    failing: Vec<Language>,
    calls: Mutex<Vec<(Language, Language)>>,
}

impl ScriptedTranslator {
    fn new(failing: Vec<Language>) -> Self {
        Self {
            failing,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(Language, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push((source, target));
        if self.failing.contains(&target) {
            return Err(TranslationError::ApiRequestFailed(
                "quota exceeded".to_string(),
            ));
        }
        Ok(format!("{}:{}", target.name(), text))
    }
}

#[tokio::test]
async fn given_multiple_targets_when_translating_then_each_target_has_one_entry() {
    let fanout = TranslationFanOut::new(Arc::new(ScriptedTranslator::new(vec![])));
    let request = TranslationRequest::new(
        "你好世界",
        Language::Chinese,
        vec![Language::English, Language::Bangla],
    );

    let outcomes = fanout.translate_all(&request).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        outcomes.get(&Language::English).unwrap().text(),
        Some("english:你好世界")
    );
    assert_eq!(
        outcomes.get(&Language::Bangla).unwrap().text(),
        Some("bangla:你好世界")
    );
}

#[tokio::test]
async fn given_duplicate_targets_when_building_request_then_duplicates_collapse() {
    let request = TranslationRequest::new(
        "text",
        Language::Chinese,
        vec![
            Language::English,
            Language::Bangla,
            Language::English,
            Language::Bangla,
        ],
    );

    assert_eq!(request.targets, vec![Language::English, Language::Bangla]);
}

#[tokio::test]
async fn given_one_failing_target_when_translating_then_siblings_are_unaffected() {
    let translator = Arc::new(ScriptedTranslator::new(vec![Language::Bangla]));
    let fanout = TranslationFanOut::new(Arc::clone(&translator));
    let request = TranslationRequest::new(
        "你好",
        Language::Chinese,
        vec![Language::English, Language::Bangla],
    );

    let outcomes = fanout.translate_all(&request).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.get(&Language::English).unwrap().is_success());
    match outcomes.get(&Language::Bangla).unwrap() {
        TranslationOutcome::Failed(reason) => assert!(reason.contains("quota exceeded")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(translator.calls().len(), 2);
}

#[tokio::test]
async fn given_empty_target_set_when_translating_then_map_is_empty() {
    let translator = Arc::new(ScriptedTranslator::new(vec![]));
    let fanout = TranslationFanOut::new(Arc::clone(&translator));
    let request = TranslationRequest::new("text", Language::Chinese, vec![]);

    let outcomes = fanout.translate_all(&request).await;

    assert!(outcomes.is_empty());
    assert!(translator.calls().is_empty());
}

#[tokio::test]
async fn given_identity_pair_when_translating_then_call_is_still_dispatched() {
    let translator = Arc::new(ScriptedTranslator::new(vec![]));
    let fanout = TranslationFanOut::new(Arc::clone(&translator));
    let request = TranslationRequest::new("hello", Language::English, vec![Language::English]);

    let outcomes = fanout.translate_all(&request).await;

    assert!(outcomes.get(&Language::English).unwrap().is_success());
    assert_eq!(
        translator.calls(),
        vec![(Language::English, Language::English)]
    );
}
