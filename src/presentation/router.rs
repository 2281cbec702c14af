use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, Translator};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    download_handler, health_handler, speech_to_text_handler, translate_text_handler,
    translate_voice_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<R, T, S>(state: AppState<R, T, S>) -> Router
where
    R: SpeechRecognizer + 'static,
    T: Translator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Multipart encoding inflates payloads, so the transport limit sits
    // above the pipeline's own asset limit; the pipeline reports oversized
    // uploads with a precise 413.
    let body_limit = (state.settings.limits.max_upload_bytes() as usize).saturating_mul(2);

    Router::new()
        .route("/health", get(health_handler))
        .route("/translate-voice", post(translate_voice_handler::<R, T, S>))
        .route("/translate-text", post(translate_text_handler::<R, T, S>))
        .route("/speech-to-text", post(speech_to_text_handler::<R, T, S>))
        .route("/download/{filename}", get(download_handler::<R, T, S>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
