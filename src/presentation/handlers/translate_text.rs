use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, Translator};
use crate::domain::Language;
use crate::presentation::handlers::responses::{
    pipeline_error_response, ErrorResponse, PipelineResponse,
};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TranslateTextRequest {
    pub text: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,
    #[serde(default = "default_generate_audio")]
    pub generate_audio: bool,
}

fn default_source_language() -> String {
    "zh-CN".to_string()
}

fn default_target_languages() -> Vec<String> {
    vec!["en".to_string(), "bn".to_string()]
}

fn default_generate_audio() -> bool {
    true
}

#[tracing::instrument(skip(state, request))]
pub async fn translate_text_handler<R, T, S>(
    State(state): State<AppState<R, T, S>>,
    Json(request): Json<TranslateTextRequest>,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
    T: Translator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let Some(source) = Language::from_tag(&request.source_language) else {
        return unsupported_language_response(&request.source_language);
    };

    let mut targets = Vec::with_capacity(request.target_languages.len());
    for tag in &request.target_languages {
        match Language::from_tag(tag) {
            Some(lang) => targets.push(lang),
            None => return unsupported_language_response(tag),
        }
    }

    tracing::debug!(
        source = %source,
        targets = targets.len(),
        generate_audio = request.generate_audio,
        "Processing text translation request"
    );

    match state
        .pipeline
        .process_text(&request.text, source, targets, request.generate_audio)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(PipelineResponse::from_result(result))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Text pipeline failed");
            pipeline_error_response(e)
        }
    }
}

fn unsupported_language_response(tag: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Unsupported language: {}", tag),
        }),
    )
        .into_response()
}
