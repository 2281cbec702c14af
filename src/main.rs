use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use voxlate::application::ports::ArtifactStore;
use voxlate::application::services::{
    PipelineService, SynthesisFanOut, TranscriptionDispatcher, TranslationFanOut,
};
use voxlate::domain::VoiceCatalog;
use voxlate::infrastructure::google::{GoogleSpeechClient, GoogleTranslateClient, GoogleTtsClient};
use voxlate::infrastructure::observability::{init_tracing, TracingConfig};
use voxlate::infrastructure::storage::LocalArtifactStore;
use voxlate::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    init_tracing(TracingConfig::default(), settings.server.port);

    if settings.google.api_key.is_empty() {
        anyhow::bail!("GOOGLE_API_KEY is not configured");
    }

    let recognizer = Arc::new(GoogleSpeechClient::new(
        &settings.google.speech_base_url,
        &settings.google.api_key,
    ));
    let translator = Arc::new(GoogleTranslateClient::new(
        &settings.google.translation_base_url,
        &settings.google.api_key,
    ));
    let synthesizer = Arc::new(GoogleTtsClient::new(
        &settings.google.tts_base_url,
        &settings.google.api_key,
    ));

    let artifact_store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(PathBuf::from(
        &settings.storage.output_dir,
    ))?);

    let pipeline = Arc::new(PipelineService::new(
        TranscriptionDispatcher::new(recognizer),
        TranslationFanOut::new(translator),
        SynthesisFanOut::new(
            synthesizer,
            Arc::clone(&artifact_store),
            VoiceCatalog::default(),
        ),
        settings.limits.max_upload_bytes(),
    ));

    let state = AppState {
        pipeline,
        artifact_store,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
