//! Speaker diarization: partitioning an audio timeline into speaker-labeled
//! intervals.
//!
//! The external segmentation capability is opaque behind [`DiarizationEngine`];
//! [`FrameDiarizer`] normalizes its raw output into ordered [`Segment`]s.

mod adapter;
mod energy;

pub use adapter::FrameDiarizer;
pub use energy::EnergyDiarizer;

use parlance_audio::AudioSource;
use serde::{Deserialize, Serialize};

/// Width of one analysis window when the engine reports per-window frame
/// labels instead of timed segments.
pub const ANALYSIS_WINDOW_MS: u64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum DiarizationError {
    #[error("unexpected output format from speaker diarization")]
    MalformedOutput,
    #[error("diarization engine failure: {0}")]
    EngineFailure(String),
}

pub type Result<T> = std::result::Result<T, DiarizationError>;

/// Opaque small-integer speaker identifier, local to one audio file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeakerId(pub i32);

impl SpeakerId {
    /// 1-based ordinal rendering ("Speaker 1" for id 0). Presentation only.
    pub fn display_name(&self) -> String {
        format!("Speaker {}", self.0 + 1)
    }
}

/// One contiguous interval attributed to one speaker. `start_ms < end_ms`;
/// sequences produced for one audio source are ordered by `start_ms` and
/// non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub speaker: SpeakerId,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Segment {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// One positional field of the engine's tuple-shaped output.
#[derive(Debug, Clone)]
pub enum RawArray {
    /// Per-window integer frame labels.
    Labels(Vec<i32>),
    /// Per-cluster quality metrics.
    Metrics(Vec<f32>),
}

/// Raw output of an external segmentation engine, before normalization.
#[derive(Debug, Clone)]
pub enum RawDiarization {
    /// The expected 3-tuple-of-arrays shape: frame labels over consecutive
    /// fixed-width windows, cluster purity, speaker purity. Anything else
    /// is rejected as malformed.
    Tuple(Vec<RawArray>),
    /// Segments with native timing. These boundaries are authoritative and
    /// pass through unmodified after validation.
    Timed(Vec<Segment>),
}

/// External speaker-segmentation capability.
pub trait DiarizationEngine: Send + Sync {
    fn label_frames(&self, audio: &AudioSource, expected_speakers: usize)
        -> Result<RawDiarization>;
}

/// Normalized diarization capability consumed by the pipeline.
pub trait Diarizer: Send + Sync {
    /// `expected_speakers` is a hint; the engine may return more or fewer
    /// distinct labels and no re-clustering happens downstream.
    fn diarize(&self, audio: &AudioSource, expected_speakers: usize) -> Result<Vec<Segment>>;
}
