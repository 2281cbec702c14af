use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, Translator};
use crate::domain::{AudioAsset, Language};
use crate::presentation::handlers::responses::{
    pipeline_error_response, ErrorResponse, PipelineResponse,
};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state, multipart))]
pub async fn translate_voice_handler<R, T, S>(
    State(state): State<AppState<R, T, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
    T: Translator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let mut file: Option<(String, Bytes)> = None;
    let mut source_language_raw: Option<String> = None;
    let mut target_languages_raw: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(data) => file = Some((filename, data)),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                }
            }
            "source_language" => {
                source_language_raw = field.text().await.ok();
            }
            "target_languages" => {
                target_languages_raw = field.text().await.ok();
            }
            _ => continue,
        }
    }

    let Some((filename, data)) = file else {
        tracing::warn!("Voice translation request with no file");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file uploaded".to_string(),
            }),
        )
            .into_response();
    };

    if filename.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file selected".to_string(),
            }),
        )
            .into_response();
    }

    let source_language = match parse_source_language(source_language_raw.as_deref()) {
        Ok(lang) => lang,
        Err(response) => return response,
    };
    let target_languages = match parse_target_languages(target_languages_raw.as_deref()) {
        Ok(langs) => langs,
        Err(response) => return response,
    };

    tracing::debug!(
        filename = %filename,
        bytes = data.len(),
        "Processing voice translation upload"
    );

    let asset = AudioAsset::new(filename, data);
    match state
        .pipeline
        .process_voice(asset, source_language, target_languages)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(PipelineResponse::from_result(result))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Voice pipeline failed");
            pipeline_error_response(e)
        }
    }
}

/// Empty, missing or `auto` means the auto-detect sweep.
fn parse_source_language(raw: Option<&str>) -> Result<Option<Language>, Response> {
    match raw.map(str::trim) {
        None | Some("") | Some("auto") => Ok(None),
        Some(tag) => match Language::from_tag(tag) {
            Some(lang) => Ok(Some(lang)),
            None => Err(unsupported_language_response(tag)),
        },
    }
}

/// Comma-separated tags; missing or empty means the default `en,bn` pair.
fn parse_target_languages(raw: Option<&str>) -> Result<Vec<Language>, Response> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(vec![Language::English, Language::Bangla]),
        Some(r) => r,
    };

    let mut targets = Vec::new();
    for tag in raw.split(',') {
        match Language::from_tag(tag) {
            Some(lang) => targets.push(lang),
            None => return Err(unsupported_language_response(tag.trim())),
        }
    }
    Ok(targets)
}

fn unsupported_language_response(tag: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Unsupported language: {}", tag),
        }),
    )
        .into_response()
}
