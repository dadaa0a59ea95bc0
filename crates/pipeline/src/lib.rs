//! Pipeline orchestration: diarize, transcribe each segment, score each
//! transcript, collect in temporal order.
//!
//! Diarization failure is fatal and aborts before any transcription work.
//! Per-segment failures never surface here: the transcription adapter folds
//! them into sentinel transcripts, so a request either fails once at the
//! diarization stage or returns the full ordered turn list.

use futures::stream::{self, StreamExt};
use parlance_audio::AudioSource;
use parlance_diarization::{DiarizationError, Diarizer, Segment};
use parlance_sentiment::{SentimentResult, SentimentScorer};
use parlance_stt::{Transcriber, Transcript};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default number of concurrent per-segment transcription calls.
/// Sequential execution satisfies every invariant; raising this only
/// overlaps the I/O-bound recognition round trips.
pub const DEFAULT_TRANSCRIBE_WORKERS: usize = 1;

/// Default speaker-count hint handed to diarization.
pub const DEFAULT_EXPECTED_SPEAKERS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("speaker diarization failed: {0}")]
    Diarization(#[from] DiarizationError),
    #[error("diarization task failed: {0}")]
    Join(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// One speaker turn: where it sits on the timeline, what was said, and how
/// it scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerTurn {
    pub segment: Segment,
    pub transcript: Transcript,
    pub sentiment: SentimentResult,
}

impl SpeakerTurn {
    /// 1-based ordinal rendering of the file-local speaker id.
    pub fn speaker_name(&self) -> String {
        self.segment.speaker.display_name()
    }
}

/// Ordered, speaker-attributed result of one analysis request. Never
/// mutated after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub turns: Vec<SpeakerTurn>,
}

/// Orchestrates the diarize -> map(transcribe) -> map(score) -> collect
/// sequence over capability traits, so it is testable with deterministic
/// fakes.
pub struct Analyzer {
    diarizer: Arc<dyn Diarizer>,
    transcriber: Arc<dyn Transcriber>,
    scorer: &'static SentimentScorer,
    transcribe_workers: usize,
}

impl Analyzer {
    pub fn new(diarizer: Arc<dyn Diarizer>, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            diarizer,
            transcriber,
            scorer: SentimentScorer::shared(),
            transcribe_workers: DEFAULT_TRANSCRIBE_WORKERS,
        }
    }

    pub fn with_transcribe_workers(mut self, workers: usize) -> Self {
        self.transcribe_workers = workers.max(1);
        self
    }

    /// Run the full pipeline over one audio source.
    ///
    /// The returned turns follow the diarization order (ascending segment
    /// start); concurrent transcription cannot reorder them because results
    /// are collected in input order, not completion order. Zero segments is
    /// a valid, empty result.
    pub async fn analyze(
        &self,
        audio: &AudioSource,
        expected_speakers: usize,
    ) -> Result<AnalysisResult> {
        let segments = self.diarize(audio, expected_speakers).await?;
        tracing::info!(
            segments = segments.len(),
            duration_ms = audio.duration_ms(),
            "diarization complete"
        );

        let turns: Vec<SpeakerTurn> = stream::iter(segments)
            .map(|segment| {
                let transcriber = Arc::clone(&self.transcriber);
                let scorer = self.scorer;
                let audio = audio.clone();
                async move {
                    let transcript = transcriber.transcribe(&audio, &segment).await;
                    let sentiment = scorer.score(&transcript);
                    SpeakerTurn {
                        segment,
                        transcript,
                        sentiment,
                    }
                }
            })
            // `buffered` yields in input order regardless of completion
            // order, which is the ordering guarantee the contract needs.
            .buffered(self.transcribe_workers)
            .collect()
            .await;

        tracing::info!(turns = turns.len(), "analysis assembled");
        Ok(AnalysisResult { turns })
    }

    /// Diarization is one blocking call; run it off the async workers.
    async fn diarize(
        &self,
        audio: &AudioSource,
        expected_speakers: usize,
    ) -> Result<Vec<Segment>> {
        let diarizer = Arc::clone(&self.diarizer);
        let audio = audio.clone();
        tokio::task::spawn_blocking(move || diarizer.diarize(&audio, expected_speakers))
            .await
            .map_err(|e| PipelineError::Join(e.to_string()))?
            .map_err(PipelineError::from)
    }
}
