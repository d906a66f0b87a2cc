//! Placeholder TTS engine

use async_trait::async_trait;
use domain::SynthesisRequest;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::tone;
use crate::types::{AudioData, AudioFormat};

/// Serves TTS requests with the fallback tone when no real engine is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneSynthesizer;

impl ToneSynthesizer {
    /// Create the synthesizer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextToSpeech for ToneSynthesizer {
    #[instrument(skip(self, request), fields(text_len = request.text().len(), speed = %request.speed()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SpeechError> {
        let duration = tone::tone_duration(request.text(), request.speed());
        let bytes = tone::synthesize_tone(request.text(), request.speed())?;
        debug!(duration, bytes = bytes.len(), "Generated placeholder tone");

        Ok(AudioData::new(bytes, AudioFormat::Wav).with_duration(duration))
    }

    fn engine_name(&self) -> &str {
        "tone"
    }

    fn is_placeholder(&self) -> bool {
        true
    }
}
