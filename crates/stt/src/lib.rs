//! Speech-to-text over diarized segments.
//!
//! The external recognition capability lives behind [`SpeechEngine`];
//! [`SegmentTranscriber`] turns its failure modes into sentinel transcripts
//! so a bad segment can never abort the surrounding request.

mod adapter;
mod http;

pub use adapter::SegmentTranscriber;
pub use http::{HttpSpeechEngine, UnconfiguredEngine};

use parlance_audio::AudioSource;
use parlance_diarization::Segment;
use serde::{Deserialize, Serialize};

/// Placeholder text when the engine cannot resolve speech content.
pub const UNINTELLIGIBLE_TEXT: &str = "Could not understand audio";

/// Placeholder text when the recognition service is unreachable or rejects
/// the request.
pub const SERVICE_ERROR_TEXT: &str = "Error with Speech Recognition API";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptStatus {
    Ok,
    Unintelligible,
    ServiceError,
}

/// Result of transcribing one segment. `text` is a human-readable sentinel
/// when `status` is not `Ok`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub status: TranscriptStatus,
}

impl Transcript {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: TranscriptStatus::Ok,
        }
    }

    pub fn unintelligible() -> Self {
        Self {
            text: UNINTELLIGIBLE_TEXT.to_string(),
            status: TranscriptStatus::Unintelligible,
        }
    }

    pub fn service_error() -> Self {
        Self {
            text: SERVICE_ERROR_TEXT.to_string(),
            status: TranscriptStatus::ServiceError,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("could not resolve speech content")]
    Unintelligible,
    #[error("recognition service error: {0}")]
    Service(String),
}

/// External speech-to-text capability.
#[async_trait::async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Recognize mono PCM samples at the given rate.
    async fn recognize(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> std::result::Result<String, RecognizeError>;
}

/// Per-segment transcription capability consumed by the pipeline.
///
/// Infallible by contract: every invocation yields a [`Transcript`], with
/// engine failures folded into the sentinel statuses.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &AudioSource, segment: &Segment) -> Transcript;
}
