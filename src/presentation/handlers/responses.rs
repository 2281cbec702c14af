use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::services::{
    PipelineError, PipelineResult, SynthesisOutcome, TranslationOutcome,
};
use crate::domain::Language;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wire shape shared by the voice and text pipeline endpoints. Failing
/// languages stay visible in the maps with their reasons; `success` only
/// reflects the whole-request outcome.
#[derive(Serialize)]
pub struct PipelineResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<TranscriptionBody>,
    pub translations: BTreeMap<Language, TranslationEntry>,
    pub audio_files: BTreeMap<Language, AudioFileEntry>,
    pub processing_time: f64,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct TranscriptionBody {
    pub text: String,
    pub confidence: f32,
    pub language: Language,
}

#[derive(Serialize)]
pub struct TranslationEntry {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct AudioFileEntry {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineResponse {
    pub fn from_result(result: PipelineResult) -> Self {
        let transcription = result.transcription.map(|t| TranscriptionBody {
            text: t.text,
            confidence: t.confidence,
            language: t.language,
        });

        let translations = result
            .translations
            .into_iter()
            .map(|(language, outcome)| {
                let entry = match outcome {
                    TranslationOutcome::Translated(text) => TranslationEntry {
                        success: true,
                        text: Some(text),
                        error: None,
                    },
                    TranslationOutcome::Failed(reason) => TranslationEntry {
                        success: false,
                        text: None,
                        error: Some(reason),
                    },
                };
                (language, entry)
            })
            .collect();

        let audio_files = result
            .audio
            .into_iter()
            .map(|(language, outcome)| {
                let entry = match outcome {
                    SynthesisOutcome::Synthesized(artifact) => AudioFileEntry {
                        success: true,
                        url: Some(format!("/download/{}", artifact.filename)),
                        size_bytes: Some(artifact.size_bytes),
                        error: None,
                    },
                    SynthesisOutcome::Failed(reason) => AudioFileEntry {
                        success: false,
                        url: None,
                        size_bytes: None,
                        error: Some(reason),
                    },
                };
                (language, entry)
            })
            .collect();

        Self {
            success: result.success,
            transcription,
            translations,
            audio_files,
            processing_time: result.elapsed.as_secs_f64(),
            timestamp: result.timestamp.to_rfc3339(),
        }
    }
}

/// Map stage-fatal pipeline errors onto HTTP statuses. Per-language failures
/// never reach this path; they ride inside a 200 response.
pub fn pipeline_error_response(e: PipelineError) -> Response {
    let status = match &e {
        PipelineError::UnsupportedFormat(_) | PipelineError::EmptyInput => StatusCode::BAD_REQUEST,
        PipelineError::AssetTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        PipelineError::NoSpeechDetected => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Transcription(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}
