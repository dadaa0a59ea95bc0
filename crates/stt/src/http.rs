//! Remote recognition engine speaking multipart WAV over HTTP.

use crate::{RecognizeError, SpeechEngine};
use serde::Deserialize;
use std::io::Cursor;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    text: String,
}

/// Posts each segment window as a WAV part to a recognition endpoint.
///
/// Expected answer: `200` with `{"text": "..."}`. An empty `text` means the
/// service saw no resolvable speech; transport and non-2xx failures are
/// service errors.
pub struct HttpSpeechEngine {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSpeechEngine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Encode samples as 16-bit mono WAV in memory.
    fn to_wav_bytes(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, RecognizeError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| RecognizeError::Service(e.to_string()))?;
            for sample in samples {
                let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(value)
                    .map_err(|e| RecognizeError::Service(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| RecognizeError::Service(e.to_string()))?;
        }
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl SpeechEngine for HttpSpeechEngine {
    async fn recognize(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<String, RecognizeError> {
        let wav = Self::to_wav_bytes(samples, sample_rate)?;

        let part = reqwest::multipart::Part::bytes(wav)
            .file_name("segment.wav")
            .mime_str("audio/wav")
            .map_err(|e| RecognizeError::Service(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecognizeError::Service(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RecognizeError::Service(format!(
                "recognition endpoint returned {}",
                response.status()
            )));
        }

        let body: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| RecognizeError::Service(e.to_string()))?;

        let text = body.text.trim().to_string();
        if text.is_empty() {
            return Err(RecognizeError::Unintelligible);
        }
        tracing::debug!(chars = text.len(), "remote recognition succeeded");
        Ok(text)
    }
}

/// Engine used when no recognition endpoint is configured: every request
/// resolves to the service-error sentinel downstream, which keeps the rest
/// of the pipeline exercisable offline.
pub struct UnconfiguredEngine;

#[async_trait::async_trait]
impl SpeechEngine for UnconfiguredEngine {
    async fn recognize(
        &self,
        _samples: &[f32],
        _sample_rate: u32,
    ) -> Result<String, RecognizeError> {
        Err(RecognizeError::Service(
            "no recognition endpoint configured".into(),
        ))
    }
}
