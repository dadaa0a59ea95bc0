//! HTTP surface: upload validation, staging, pipeline invocation, and the
//! response shapes the frontend consumes.

use crate::config::ServerConfig;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use parlance_diarization::DiarizationError;
use parlance_pipeline::{AnalysisResult, Analyzer, PipelineError};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;

const ERR_NO_FILE: &str = "No file uploaded";
const ERR_INVALID_FORMAT: &str = "Invalid file format. Please upload a valid WAV file.";
const ERR_MALFORMED_DIARIZATION: &str = "Unexpected output format from speaker diarization.";

const WAVE_MIME_TYPES: &[&str] = &["audio/wav", "audio/x-wav", "audio/wave", "audio/vnd.wave"];

const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub config: Arc<ServerConfig>,
}

pub fn router(state: AppState) -> Router {
    let index = Path::new(env!("CARGO_MANIFEST_DIR")).join("static/index.html");
    Router::new()
        .route_service("/", ServeFile::new(index))
        .route("/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct TurnResponse {
    speaker: String,
    transcription: String,
    sentiment_analysis: SentimentResponse,
}

#[derive(Serialize)]
struct SentimentResponse {
    sentiment_score: parlance_sentiment::IntensityScores,
    polarity: f64,
    overall_sentiment: &'static str,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn results_response(result: AnalysisResult) -> Response {
    let results: Vec<TurnResponse> = result
        .turns
        .iter()
        .map(|turn| TurnResponse {
            speaker: turn.speaker_name(),
            transcription: turn.transcript.text.clone(),
            sentiment_analysis: SentimentResponse {
                sentiment_score: turn.sentiment.scores,
                polarity: turn.sentiment.polarity,
                overall_sentiment: turn.sentiment.label.as_str(),
            },
        })
        .collect();
    Json(json!({ "results": results })).into_response()
}

/// Strip path components and anything outside `[A-Za-z0-9._-]` from an
/// uploaded filename.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "upload.wav".to_string()
    } else {
        cleaned
    }
}

fn is_wave_upload(filename: &str, content_type: Option<&str>) -> bool {
    let extension_ok = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);
    let mime_ok = match content_type {
        Some(ct) => WAVE_MIME_TYPES.contains(&ct.to_ascii_lowercase().as_str()),
        // Browsers sometimes omit the part content type; the extension
        // gate still applies.
        None => true,
    };
    extension_ok && mime_ok
}

async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("audio") {
            return process_upload(&state, field).await;
        }
    }
    error_response(StatusCode::BAD_REQUEST, ERR_NO_FILE)
}

async fn process_upload(
    state: &AppState,
    field: axum::extract::multipart::Field<'_>,
) -> Response {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    if !is_wave_upload(&filename, content_type.as_deref()) {
        return error_response(StatusCode::BAD_REQUEST, ERR_INVALID_FORMAT);
    }

    let data = match field.bytes().await {
        Ok(data) if !data.is_empty() => data,
        _ => return error_response(StatusCode::BAD_REQUEST, ERR_NO_FILE),
    };

    // Stage the upload, then read it back for segment extraction.
    let staged = state.config.upload_dir.join(sanitize_filename(&filename));
    if let Err(e) = tokio::fs::write(&staged, &data).await {
        tracing::error!(path = %staged.display(), error = %e, "failed to stage upload");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store upload.");
    }

    let audio = match parlance_audio::AudioSource::from_wav_path(&staged) {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!(path = %staged.display(), error = %e, "rejected upload");
            return error_response(StatusCode::BAD_REQUEST, ERR_INVALID_FORMAT);
        }
    };

    tracing::info!(
        file = %staged.display(),
        duration_ms = audio.duration_ms(),
        "analysis request accepted"
    );

    match state
        .analyzer
        .analyze(&audio, state.config.expected_speakers)
        .await
    {
        Ok(result) => results_response(result),
        Err(PipelineError::Diarization(DiarizationError::MalformedOutput)) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, ERR_MALFORMED_DIARIZATION)
        }
        Err(PipelineError::Diarization(DiarizationError::EngineFailure(message))) => {
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Speaker diarization failed: {message}"),
            )
        }
        Err(PipelineError::Join(e)) => {
            tracing::error!(error = %e, "pipeline task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
    }
}
