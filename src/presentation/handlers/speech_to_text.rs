use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, Translator};
use crate::domain::{AudioAsset, Language};
use crate::presentation::handlers::responses::{pipeline_error_response, ErrorResponse};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct SpeechToTextResponse {
    pub text: String,
    pub confidence: f32,
    pub language: Language,
    pub processing_time: f64,
    pub timestamp: String,
}

/// Transcription-only endpoint. With no language field the dispatcher runs
/// the auto-detect sweep over Chinese, English and Bangla.
#[tracing::instrument(skip(state, multipart))]
pub async fn speech_to_text_handler<R, T, S>(
    State(state): State<AppState<R, T, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
    T: Translator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let mut file: Option<(String, Bytes)> = None;
    let mut language_raw: Option<String> = None;

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
            "language" => {
                language_raw = field.text().await.ok();
            }
            _ => continue,
        }
    }

    let Some((filename, data)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file uploaded".to_string(),
            }),
        )
            .into_response();
    };

    let language = match language_raw.as_deref().map(str::trim) {
        None | Some("") | Some("auto") => None,
        Some(tag) => match Language::from_tag(tag) {
            Some(lang) => Some(lang),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Unsupported language: {}", tag),
                    }),
                )
                    .into_response();
            }
        },
    };

    let asset = AudioAsset::new(filename, data);
    match state.pipeline.transcribe_only(asset, language).await {
        Ok(transcript) => (
            StatusCode::OK,
            Json(SpeechToTextResponse {
                text: transcript.text,
                confidence: transcript.confidence,
                language: transcript.language,
                processing_time: transcript.duration.as_secs_f64(),
                timestamp: Utc::now().to_rfc3339(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Transcription failed");
            pipeline_error_response(e)
        }
    }
}
