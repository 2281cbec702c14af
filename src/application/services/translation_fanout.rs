use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future;

use crate::application::ports::Translator;
use crate::domain::Language;

/// A single utterance to be translated into one or more target languages.
/// Duplicate targets are collapsed on construction.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source: Language,
    pub targets: Vec<Language>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: Language, targets: Vec<Language>) -> Self {
        let mut deduped = Vec::with_capacity(targets.len());
        for target in targets {
            if !deduped.contains(&target) {
                deduped.push(target);
            }
        }
        Self {
            text: text.into(),
            source,
            targets: deduped,
        }
    }
}

/// Per-language result of the translation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    Translated(String),
    Failed(String),
}

impl TranslationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Translated(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Translated(text) => Some(text),
            Self::Failed(_) => None,
        }
    }
}

pub struct TranslationFanOut<T>
where
    T: Translator,
{
    translator: Arc<T>,
}

impl<T> TranslationFanOut<T>
where
    T: Translator,
{
    pub fn new(translator: Arc<T>) -> Self {
        Self { translator }
    }

    /// Translate the request text into every target language independently.
    /// The returned map holds exactly one entry per requested target; a
    /// failure for one language never aborts the others. Identity pairs
    /// (source == target) are dispatched like any other.
    pub async fn translate_all(
        &self,
        request: &TranslationRequest,
    ) -> BTreeMap<Language, TranslationOutcome> {
        if request.targets.is_empty() {
            return BTreeMap::new();
        }

        tracing::debug!(
            source = %request.source,
            targets = request.targets.len(),
            "Dispatching translation fan-out"
        );

        let calls = request.targets.iter().map(|&target| {
            let translator = Arc::clone(&self.translator);
            let text = request.text.clone();
            let source = request.source;
            async move {
                let outcome = match translator.translate(&text, source, target).await {
                    Ok(translated) => TranslationOutcome::Translated(translated),
                    Err(e) => {
                        tracing::warn!(target = %target, error = %e, "Translation failed");
                        TranslationOutcome::Failed(e.to_string())
                    }
                };
                (target, outcome)
            }
        });

        future::join_all(calls).await.into_iter().collect()
    }
}
