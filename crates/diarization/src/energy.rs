//! Built-in segmentation engine: per-window energy features clustered into
//! speaker labels.
//!
//! Deliberately simple and fully deterministic. Real deployments bind a
//! model-backed [`DiarizationEngine`]; this one keeps the pipeline usable
//! without external model files.

use crate::{DiarizationEngine, DiarizationError, RawArray, RawDiarization, Result};
use parlance_audio::AudioSource;

const KMEANS_ROUNDS: usize = 10;

/// Per-window feature vector: RMS energy and zero-crossing rate.
#[derive(Debug, Clone, Copy)]
struct Feature {
    rms: f32,
    zcr: f32,
}

impl Feature {
    fn of(window: &[f32]) -> Self {
        let energy: f32 = window.iter().map(|s| s * s).sum();
        let rms = (energy / window.len() as f32).sqrt();
        let crossings = window
            .windows(2)
            .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
            .count();
        let zcr = crossings as f32 / window.len() as f32;
        Self { rms, zcr }
    }

    fn dist2(&self, other: &Feature) -> f32 {
        let dr = self.rms - other.rms;
        let dz = self.zcr - other.zcr;
        dr * dr + dz * dz
    }
}

/// Energy-feature diarization engine producing the tuple-of-arrays shape.
pub struct EnergyDiarizer {
    window_ms: u64,
}

impl EnergyDiarizer {
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms }
    }

    fn features(&self, audio: &AudioSource) -> Vec<Feature> {
        let window_len = ((audio.sample_rate() as u64 * self.window_ms / 1000) as usize).max(1);
        audio
            .samples()
            .chunks(window_len)
            .filter(|w| !w.is_empty())
            .map(Feature::of)
            .collect()
    }

    /// K-means with quantile-seeded centroids and a fixed round count, so
    /// the same input always produces the same labels.
    fn cluster(features: &[Feature], k: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..features.len()).collect();
        order.sort_by(|&a, &b| {
            features[a]
                .rms
                .partial_cmp(&features[b].rms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut centroids: Vec<Feature> = (0..k)
            .map(|c| features[order[c * (features.len() - 1) / (k - 1).max(1)]])
            .collect();

        let mut labels = vec![0usize; features.len()];
        for _ in 0..KMEANS_ROUNDS {
            for (i, f) in features.iter().enumerate() {
                labels[i] = centroids
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| {
                        f.dist2(a)
                            .partial_cmp(&f.dist2(b))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(c, _)| c)
                    .unwrap_or(0);
            }
            for (c, centroid) in centroids.iter_mut().enumerate() {
                let members: Vec<&Feature> = features
                    .iter()
                    .zip(&labels)
                    .filter(|(_, l)| **l == c)
                    .map(|(f, _)| f)
                    .collect();
                if members.is_empty() {
                    continue;
                }
                centroid.rms = members.iter().map(|f| f.rms).sum::<f32>() / members.len() as f32;
                centroid.zcr = members.iter().map(|f| f.zcr).sum::<f32>() / members.len() as f32;
            }
        }
        labels
    }

    /// Mean intra-cluster distance per cluster (lower is tighter).
    fn cluster_purity(features: &[Feature], labels: &[usize], k: usize) -> Vec<f32> {
        (0..k)
            .map(|c| {
                let members: Vec<&Feature> = features
                    .iter()
                    .zip(labels)
                    .filter(|(_, l)| **l == c)
                    .map(|(f, _)| f)
                    .collect();
                if members.len() < 2 {
                    return 0.0;
                }
                let mean = Feature {
                    rms: members.iter().map(|f| f.rms).sum::<f32>() / members.len() as f32,
                    zcr: members.iter().map(|f| f.zcr).sum::<f32>() / members.len() as f32,
                };
                members.iter().map(|f| f.dist2(&mean).sqrt()).sum::<f32>()
                    / members.len() as f32
            })
            .collect()
    }

    /// Share of windows owned by each cluster.
    fn occupancy(labels: &[usize], k: usize) -> Vec<f32> {
        (0..k)
            .map(|c| labels.iter().filter(|l| **l == c).count() as f32 / labels.len() as f32)
            .collect()
    }
}

impl DiarizationEngine for EnergyDiarizer {
    fn label_frames(&self, audio: &AudioSource, expected_speakers: usize) -> Result<RawDiarization> {
        if expected_speakers == 0 {
            return Err(DiarizationError::EngineFailure(
                "expected_speakers must be positive".into(),
            ));
        }
        let features = self.features(audio);
        if features.is_empty() {
            return Ok(RawDiarization::Tuple(vec![
                RawArray::Labels(Vec::new()),
                RawArray::Metrics(Vec::new()),
                RawArray::Metrics(Vec::new()),
            ]));
        }

        let k = expected_speakers.min(features.len());
        let raw_labels = Self::cluster(&features, k);

        // Remap cluster indices by first appearance so labels are stable
        // across runs and start at 0.
        let mut mapping: Vec<Option<i32>> = vec![None; k];
        let mut next = 0i32;
        let labels: Vec<i32> = raw_labels
            .iter()
            .map(|&c| {
                *mapping[c].get_or_insert_with(|| {
                    let id = next;
                    next += 1;
                    id
                })
            })
            .collect();

        let purity = Self::cluster_purity(&features, &raw_labels, k);
        let share = Self::occupancy(&raw_labels, k);

        tracing::debug!(
            windows = labels.len(),
            clusters = k,
            "energy diarization labeled frames"
        );

        Ok(RawDiarization::Tuple(vec![
            RawArray::Labels(labels),
            RawArray::Metrics(purity),
            RawArray::Metrics(share),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diarizer, FrameDiarizer};

    /// Two-tone audio: quiet low-frequency first half, loud high-frequency
    /// second half. The feature split is unambiguous for k=2.
    fn two_speaker_audio() -> AudioSource {
        let rate = 16000usize;
        let mut samples = Vec::with_capacity(rate * 4);
        for i in 0..rate * 2 {
            samples.push(0.05 * (i as f32 * 0.02).sin());
        }
        for i in 0..rate * 2 {
            samples.push(0.8 * (i as f32 * 0.9).sin());
        }
        AudioSource::from_samples(samples, 16000).unwrap()
    }

    #[test]
    fn separates_distinct_halves() {
        let diarizer = FrameDiarizer::new(EnergyDiarizer::new(1000));
        let segments = diarizer.diarize(&two_speaker_audio(), 2).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].speaker.0, 0);
        assert_eq!(segments[1].speaker.0, 1);
        assert_eq!(segments[0].end_ms, segments[1].start_ms);
    }

    #[test]
    fn deterministic_across_runs() {
        let audio = two_speaker_audio();
        let engine = EnergyDiarizer::new(1000);
        let a = format!("{:?}", engine.label_frames(&audio, 2).unwrap());
        let b = format!("{:?}", engine.label_frames(&audio, 2).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn single_speaker_hint_yields_one_label() {
        let diarizer = FrameDiarizer::new(EnergyDiarizer::new(1000));
        let segments = diarizer.diarize(&two_speaker_audio(), 1).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].speaker.0, 0);
    }

    #[test]
    fn zero_speaker_hint_is_engine_failure() {
        let engine = EnergyDiarizer::new(1000);
        assert!(matches!(
            engine.label_frames(&two_speaker_audio(), 0),
            Err(DiarizationError::EngineFailure(_))
        ));
    }
}
