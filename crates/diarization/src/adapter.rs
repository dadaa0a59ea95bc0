//! Normalization of raw engine output into ordered, minimal segments.

use crate::{
    DiarizationEngine, DiarizationError, Diarizer, RawArray, RawDiarization, Result, Segment,
    SpeakerId, ANALYSIS_WINDOW_MS,
};
use parlance_audio::AudioSource;

/// Adapter from an opaque [`DiarizationEngine`] to the [`Diarizer`] contract.
///
/// Enforces the 3-tuple output schema and collapses runs of identical frame
/// labels over consecutive fixed-width windows into one segment per run.
/// Never re-clusters: the label set is whatever the engine returned.
pub struct FrameDiarizer<E> {
    engine: E,
    window_ms: u64,
}

impl<E: DiarizationEngine> FrameDiarizer<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            window_ms: ANALYSIS_WINDOW_MS,
        }
    }

    pub fn with_window_ms(engine: E, window_ms: u64) -> Self {
        Self { engine, window_ms }
    }

    /// Strict schema check: exactly (labels, cluster purity, speaker purity).
    fn frame_labels(raw: Vec<RawArray>) -> Result<Vec<i32>> {
        let mut fields = raw.into_iter();
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (
                Some(RawArray::Labels(labels)),
                Some(RawArray::Metrics(_)),
                Some(RawArray::Metrics(_)),
                None,
            ) => Ok(labels),
            _ => Err(DiarizationError::MalformedOutput),
        }
    }

    /// Collapse a run of identical labels over consecutive windows into one
    /// segment. The final window is clipped to the audio duration so the
    /// last segment never extends past the end of the recording.
    fn collapse(&self, labels: &[i32], total_ms: u64) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut run_start = 0usize;
        for i in 1..=labels.len() {
            if i == labels.len() || labels[i] != labels[run_start] {
                let start_ms = run_start as u64 * self.window_ms;
                let end_ms = (i as u64 * self.window_ms).min(total_ms.max(start_ms + 1));
                segments.push(Segment {
                    speaker: SpeakerId(labels[run_start]),
                    start_ms,
                    end_ms,
                });
                run_start = i;
            }
        }
        segments
    }

    fn validate_timed(segments: Vec<Segment>) -> Result<Vec<Segment>> {
        let mut prev_end = 0u64;
        for seg in &segments {
            if seg.start_ms >= seg.end_ms || seg.start_ms < prev_end {
                return Err(DiarizationError::MalformedOutput);
            }
            prev_end = seg.end_ms;
        }
        Ok(segments)
    }
}

impl<E: DiarizationEngine> Diarizer for FrameDiarizer<E> {
    fn diarize(&self, audio: &AudioSource, expected_speakers: usize) -> Result<Vec<Segment>> {
        let raw = self.engine.label_frames(audio, expected_speakers)?;
        let segments = match raw {
            // Native timing is authoritative; do not re-window.
            RawDiarization::Timed(segments) => Self::validate_timed(segments)?,
            RawDiarization::Tuple(fields) => {
                let labels = Self::frame_labels(fields)?;
                self.collapse(&labels, audio.duration_ms())
            }
        };
        tracing::debug!(
            segments = segments.len(),
            expected_speakers,
            "diarization normalized"
        );
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEngine(fn() -> Result<RawDiarization>);

    impl DiarizationEngine for FixedEngine {
        fn label_frames(&self, _: &AudioSource, _: usize) -> Result<RawDiarization> {
            (self.0)()
        }
    }

    fn audio(ms: u64) -> AudioSource {
        AudioSource::from_samples(vec![0.1f32; (ms * 16) as usize], 16000).unwrap()
    }

    fn tuple(labels: Vec<i32>) -> RawDiarization {
        RawDiarization::Tuple(vec![
            RawArray::Labels(labels),
            RawArray::Metrics(vec![0.9]),
            RawArray::Metrics(vec![0.8]),
        ])
    }

    #[test]
    fn collapses_label_runs_into_minimal_spans() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| Ok(tuple(vec![0, 0, 1, 1, 1, 0]))));
        let segments = diarizer.diarize(&audio(6000), 2).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment {
                    speaker: SpeakerId(0),
                    start_ms: 0,
                    end_ms: 2000
                },
                Segment {
                    speaker: SpeakerId(1),
                    start_ms: 2000,
                    end_ms: 5000
                },
                Segment {
                    speaker: SpeakerId(0),
                    start_ms: 5000,
                    end_ms: 6000
                },
            ]
        );
    }

    #[test]
    fn last_window_is_clipped_to_audio_duration() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| Ok(tuple(vec![0, 0, 0]))));
        let segments = diarizer.diarize(&audio(2500), 1).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].end_ms, 2500);
    }

    #[test]
    fn two_tuple_is_malformed() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| {
            Ok(RawDiarization::Tuple(vec![
                RawArray::Labels(vec![0, 1]),
                RawArray::Metrics(vec![0.5]),
            ]))
        }));
        assert!(matches!(
            diarizer.diarize(&audio(2000), 2),
            Err(DiarizationError::MalformedOutput)
        ));
    }

    #[test]
    fn wrong_element_kind_is_malformed() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| {
            Ok(RawDiarization::Tuple(vec![
                RawArray::Metrics(vec![0.5]),
                RawArray::Metrics(vec![0.5]),
                RawArray::Labels(vec![0]),
            ]))
        }));
        assert!(matches!(
            diarizer.diarize(&audio(1000), 2),
            Err(DiarizationError::MalformedOutput)
        ));
    }

    #[test]
    fn timed_segments_pass_through_unmodified() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| {
            Ok(RawDiarization::Timed(vec![
                Segment {
                    speaker: SpeakerId(0),
                    start_ms: 120,
                    end_ms: 3470,
                },
                Segment {
                    speaker: SpeakerId(1),
                    start_ms: 3470,
                    end_ms: 4010,
                },
            ]))
        }));
        let segments = diarizer.diarize(&audio(5000), 2).unwrap();
        assert_eq!(segments[0].start_ms, 120);
        assert_eq!(segments[1].end_ms, 4010);
    }

    #[test]
    fn overlapping_timed_segments_are_malformed() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| {
            Ok(RawDiarization::Timed(vec![
                Segment {
                    speaker: SpeakerId(0),
                    start_ms: 0,
                    end_ms: 2000,
                },
                Segment {
                    speaker: SpeakerId(1),
                    start_ms: 1500,
                    end_ms: 3000,
                },
            ]))
        }));
        assert!(matches!(
            diarizer.diarize(&audio(3000), 2),
            Err(DiarizationError::MalformedOutput)
        ));
    }

    #[test]
    fn engine_failure_propagates() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| {
            Err(DiarizationError::EngineFailure("model crashed".into()))
        }));
        assert!(matches!(
            diarizer.diarize(&audio(1000), 2),
            Err(DiarizationError::EngineFailure(_))
        ));
    }

    #[test]
    fn empty_labels_yield_empty_sequence() {
        let diarizer = FrameDiarizer::new(FixedEngine(|| Ok(tuple(vec![]))));
        assert!(diarizer.diarize(&audio(1000), 2).unwrap().is_empty());
    }
}
