//! Speaker-attributed transcription-and-sentiment service.

mod config;
mod routes;

use config::ServerConfig;
use parlance_diarization::{EnergyDiarizer, FrameDiarizer, ANALYSIS_WINDOW_MS};
use parlance_pipeline::Analyzer;
use parlance_stt::{HttpSpeechEngine, SegmentTranscriber, SpeechEngine, UnconfiguredEngine};
use routes::AppState;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(ServerConfig::from_env());
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let engine: Arc<dyn SpeechEngine> = match &config.recognize_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "using remote recognition endpoint");
            Arc::new(HttpSpeechEngine::new(url.clone()))
        }
        None => {
            tracing::warn!(
                "PARLANCE_RECOGNIZE_URL not set; transcripts will carry the service-error sentinel"
            );
            Arc::new(UnconfiguredEngine)
        }
    };

    let diarizer = Arc::new(FrameDiarizer::new(EnergyDiarizer::new(ANALYSIS_WINDOW_MS)));
    let transcriber = Arc::new(SegmentTranscriber::with_timeout(
        engine,
        config.recognize_timeout,
    ));
    let analyzer = Arc::new(
        Analyzer::new(diarizer, transcriber).with_transcribe_workers(config.transcribe_workers),
    );

    let app = routes::router(AppState {
        analyzer,
        config: config.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
