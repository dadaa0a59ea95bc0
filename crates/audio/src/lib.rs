//! Audio ingestion: an immutable handle over single-channel PCM samples.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Sample rates accepted at ingestion.
pub const SUPPORTED_SAMPLE_RATES: &[u32] = &[8000, 11025, 16000, 22050, 32000, 44100, 48000];

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to read wave data: {0}")]
    Decode(String),
    #[error("expected single-channel audio, got {0} channels")]
    NotMono(u16),
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedSampleRate(u32),
    #[error("audio contains no samples")]
    Empty,
}

pub type Result<T> = std::result::Result<T, AudioError>;

/// Read-only handle to single-channel PCM audio with a fixed sample rate.
///
/// Created once per request and shared by reference through the pipeline;
/// the sample buffer is never written after construction.
#[derive(Debug, Clone)]
pub struct AudioSource {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl AudioSource {
    /// Wrap raw mono samples. Fails on an empty buffer or an unsupported rate.
    pub fn from_samples(samples: impl Into<Arc<[f32]>>, sample_rate: u32) -> Result<Self> {
        let samples = samples.into();
        if samples.is_empty() {
            return Err(AudioError::Empty);
        }
        if !SUPPORTED_SAMPLE_RATES.contains(&sample_rate) {
            return Err(AudioError::UnsupportedSampleRate(sample_rate));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Decode a WAV file from disk.
    pub fn from_wav_path(path: &Path) -> Result<Self> {
        let reader =
            hound::WavReader::open(path).map_err(|e| AudioError::Decode(e.to_string()))?;
        Self::from_wav(reader)
    }

    /// Decode WAV data from any reader (e.g. an uploaded body held in memory).
    pub fn from_wav_reader(data: impl Read) -> Result<Self> {
        let reader = hound::WavReader::new(data).map_err(|e| AudioError::Decode(e.to_string()))?;
        Self::from_wav(reader)
    }

    fn from_wav<R: Read>(mut reader: hound::WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        if spec.channels != 1 {
            return Err(AudioError::NotMono(spec.channels));
        }

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|e| AudioError::Decode(e.to_string()))?
            }
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| AudioError::Decode(e.to_string()))?,
        };

        tracing::debug!(
            sample_rate = spec.sample_rate,
            samples = samples.len(),
            "decoded wave data"
        );

        Self::from_samples(samples, spec.sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_ms(&self) -> u64 {
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }

    /// Samples in `[start_ms, end_ms)`, clamped to the buffer.
    ///
    /// Returns an empty slice when the window lies past the end of the audio.
    pub fn window(&self, start_ms: u64, end_ms: u64) -> &[f32] {
        let per_ms = self.sample_rate as u64;
        let start = ((start_ms * per_ms) / 1000).min(self.samples.len() as u64) as usize;
        let end = ((end_ms * per_ms) / 1000).min(self.samples.len() as u64) as usize;
        &self.samples[start..end.max(start)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(n: usize, rate: u32) -> AudioSource {
        AudioSource::from_samples(vec![0.1f32; n], rate).unwrap()
    }

    #[test]
    fn rejects_empty_buffer() {
        assert!(matches!(
            AudioSource::from_samples(Vec::<f32>::new(), 16000),
            Err(AudioError::Empty)
        ));
    }

    #[test]
    fn rejects_unsupported_rate() {
        assert!(matches!(
            AudioSource::from_samples(vec![0.0; 10], 12345),
            Err(AudioError::UnsupportedSampleRate(12345))
        ));
    }

    #[test]
    fn duration_from_rate_and_length() {
        assert_eq!(source(16000, 16000).duration_ms(), 1000);
        assert_eq!(source(8000, 16000).duration_ms(), 500);
    }

    #[test]
    fn window_is_half_open_and_clamped() {
        let src = source(16000, 16000); // 1 second
        assert_eq!(src.window(0, 500).len(), 8000);
        assert_eq!(src.window(500, 1000).len(), 8000);
        // Past the end: clamped, possibly empty.
        assert_eq!(src.window(900, 2000).len(), 1600);
        assert!(src.window(1500, 2000).is_empty());
        // Degenerate window.
        assert!(src.window(300, 300).is_empty());
    }

    #[test]
    fn decodes_mono_wav_and_rejects_stereo() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let dir = tempfile::tempdir().unwrap();
        let mono = dir.path().join("mono.wav");
        let mut writer = hound::WavWriter::create(&mono, spec).unwrap();
        for i in 0..1600 {
            writer.write_sample((i % 100) as i16 * 100).unwrap();
        }
        writer.finalize().unwrap();

        let src = AudioSource::from_wav_path(&mono).unwrap();
        assert_eq!(src.sample_rate(), 16000);
        assert_eq!(src.duration_ms(), 100);

        let stereo = dir.path().join("stereo.wav");
        let mut writer = hound::WavWriter::create(
            &stereo,
            hound::WavSpec {
                channels: 2,
                ..spec
            },
        )
        .unwrap();
        for _ in 0..200 {
            writer.write_sample(1i16).unwrap();
            writer.write_sample(-1i16).unwrap();
        }
        writer.finalize().unwrap();

        assert!(matches!(
            AudioSource::from_wav_path(&stereo),
            Err(AudioError::NotMono(2))
        ));
    }
}
