//! Environment-driven server configuration with defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_SPEAKERS: usize = 2;
const DEFAULT_WORKERS: usize = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub upload_dir: PathBuf,
    /// Speaker-count hint handed to diarization.
    pub expected_speakers: usize,
    /// Concurrent per-segment transcription calls.
    pub transcribe_workers: usize,
    /// Bounded timeout per recognition call.
    pub recognize_timeout: Duration,
    /// Remote recognition endpoint; absent means every segment resolves to
    /// the service-error sentinel.
    pub recognize_url: Option<String>,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Self {
        // .env is optional; real env vars win.
        let _ = dotenvy::dotenv();

        Self {
            bind: env_parse("PARLANCE_BIND", DEFAULT_BIND.parse().expect("valid default")),
            upload_dir: std::env::var("PARLANCE_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            expected_speakers: env_parse("PARLANCE_SPEAKERS", DEFAULT_SPEAKERS).max(1),
            transcribe_workers: env_parse("PARLANCE_TRANSCRIBE_WORKERS", DEFAULT_WORKERS).max(1),
            recognize_timeout: Duration::from_secs(env_parse(
                "PARLANCE_RECOGNIZE_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            recognize_url: std::env::var("PARLANCE_RECOGNIZE_URL").ok(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.parse().expect("valid default"),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            expected_speakers: DEFAULT_SPEAKERS,
            transcribe_workers: DEFAULT_WORKERS,
            recognize_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            recognize_url: None,
        }
    }
}
