//! Adapter from a fallible [`SpeechEngine`] to the infallible
//! per-segment [`Transcriber`] contract.

use crate::{RecognizeError, SpeechEngine, Transcriber, Transcript};
use parlance_audio::AudioSource;
use parlance_diarization::Segment;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SegmentTranscriber {
    engine: Arc<dyn SpeechEngine>,
    timeout: Duration,
}

impl SegmentTranscriber {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(engine: Arc<dyn SpeechEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }
}

#[async_trait::async_trait]
impl Transcriber for SegmentTranscriber {
    async fn transcribe(&self, audio: &AudioSource, segment: &Segment) -> Transcript {
        let window = audio.window(segment.start_ms, segment.end_ms);

        let recognized = tokio::time::timeout(
            self.timeout,
            self.engine.recognize(window, audio.sample_rate()),
        )
        .await;

        match recognized {
            Ok(Ok(text)) => Transcript::ok(text),
            Ok(Err(RecognizeError::Unintelligible)) => {
                tracing::debug!(
                    start_ms = segment.start_ms,
                    end_ms = segment.end_ms,
                    "segment not intelligible"
                );
                Transcript::unintelligible()
            }
            Ok(Err(RecognizeError::Service(message))) => {
                tracing::warn!(
                    start_ms = segment.start_ms,
                    end_ms = segment.end_ms,
                    %message,
                    "recognition service error"
                );
                Transcript::service_error()
            }
            // Timed out: treated the same as an unreachable service.
            Err(_) => {
                tracing::warn!(
                    start_ms = segment.start_ms,
                    end_ms = segment.end_ms,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "recognition timed out"
                );
                Transcript::service_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TranscriptStatus, SERVICE_ERROR_TEXT, UNINTELLIGIBLE_TEXT};
    use parlance_diarization::SpeakerId;
    use std::sync::Mutex;

    fn audio() -> AudioSource {
        AudioSource::from_samples(vec![0.2f32; 32000], 16000).unwrap()
    }

    fn segment(start_ms: u64, end_ms: u64) -> Segment {
        Segment {
            speaker: SpeakerId(0),
            start_ms,
            end_ms,
        }
    }

    /// Records the sample counts it was handed, then replays canned answers.
    struct ScriptedEngine {
        answers: Mutex<Vec<std::result::Result<String, RecognizeError>>>,
        seen_lens: Mutex<Vec<usize>>,
    }

    impl ScriptedEngine {
        fn new(answers: Vec<std::result::Result<String, RecognizeError>>) -> Self {
            Self {
                answers: Mutex::new(answers),
                seen_lens: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SpeechEngine for ScriptedEngine {
        async fn recognize(
            &self,
            samples: &[f32],
            _sample_rate: u32,
        ) -> std::result::Result<String, RecognizeError> {
            self.seen_lens.lock().unwrap().push(samples.len());
            self.answers.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn successful_recognition_keeps_text() {
        let engine = Arc::new(ScriptedEngine::new(vec![Ok("hello there".into())]));
        let transcriber = SegmentTranscriber::new(engine);
        let t = transcriber.transcribe(&audio(), &segment(0, 1000)).await;
        assert_eq!(t.text, "hello there");
        assert_eq!(t.status, TranscriptStatus::Ok);
    }

    #[tokio::test]
    async fn extracts_exactly_the_segment_window() {
        let engine = Arc::new(ScriptedEngine::new(vec![Ok(String::new())]));
        let transcriber = SegmentTranscriber::new(engine.clone());
        transcriber.transcribe(&audio(), &segment(500, 1500)).await;
        // [500ms, 1500ms) at 16kHz
        assert_eq!(engine.seen_lens.lock().unwrap()[0], 16000);
    }

    #[tokio::test]
    async fn unintelligible_becomes_sentinel_not_error() {
        let engine = Arc::new(ScriptedEngine::new(vec![Err(
            RecognizeError::Unintelligible,
        )]));
        let transcriber = SegmentTranscriber::new(engine);
        let t = transcriber.transcribe(&audio(), &segment(0, 1000)).await;
        assert_eq!(t.text, UNINTELLIGIBLE_TEXT);
        assert_eq!(t.status, TranscriptStatus::Unintelligible);
    }

    #[tokio::test]
    async fn service_failure_becomes_sentinel_not_error() {
        let engine = Arc::new(ScriptedEngine::new(vec![Err(RecognizeError::Service(
            "quota exceeded".into(),
        ))]));
        let transcriber = SegmentTranscriber::new(engine);
        let t = transcriber.transcribe(&audio(), &segment(0, 1000)).await;
        assert_eq!(t.text, SERVICE_ERROR_TEXT);
        assert_eq!(t.status, TranscriptStatus::ServiceError);
    }

    struct HangingEngine;

    #[async_trait::async_trait]
    impl SpeechEngine for HangingEngine {
        async fn recognize(
            &self,
            _samples: &[f32],
            _sample_rate: u32,
        ) -> std::result::Result<String, RecognizeError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn timeout_maps_to_service_error() {
        let transcriber =
            SegmentTranscriber::with_timeout(Arc::new(HangingEngine), Duration::from_millis(10));
        let t = transcriber.transcribe(&audio(), &segment(0, 1000)).await;
        assert_eq!(t.status, TranscriptStatus::ServiceError);
        assert_eq!(t.text, SERVICE_ERROR_TEXT);
    }
}
