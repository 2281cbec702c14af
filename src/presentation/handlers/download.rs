use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::ports::{
    ArtifactStoreError, SpeechRecognizer, SpeechSynthesizer, Translator,
};
use crate::domain::ArtifactPath;
use crate::presentation::handlers::responses::ErrorResponse;
use crate::presentation::state::AppState;

/// Serve a generated audio artifact by filename.
#[tracing::instrument(skip(state))]
pub async fn download_handler<R, T, S>(
    State(state): State<AppState<R, T, S>>,
    Path(filename): Path<String>,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
    T: Translator + 'static,
    S: SpeechSynthesizer + 'static,
{
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid filename".to_string(),
            }),
        )
            .into_response();
    }

    let path = ArtifactPath::from_filename(filename.clone());
    match state.artifact_store.fetch(&path).await {
        Ok(bytes) => {
            tracing::debug!(filename = %filename, bytes = bytes.len(), "Serving audio artifact");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "audio/mpeg".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(ArtifactStoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "File not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, filename = %filename, "Failed to read artifact");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Download error: {}", e),
                }),
            )
                .into_response()
        }
    }
}
