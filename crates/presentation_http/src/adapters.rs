//! Request and response adapters
//!
//! Wire shapes for the native and OpenAI-compatible endpoints, and their
//! mapping to and from the domain types. Pure data mapping: all speech work
//! happens behind the registry.

use ai_speech::{AudioFormat, SpeechError};
use domain::{DomainError, SpeakingSpeed, SynthesisRequest, Transcription};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Longest text accepted for synthesis, in characters
pub const MAX_TEXT_CHARS: u64 = 4096;

/// Model name echoed by the transcription endpoint when the caller sends none
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-small";

/// Body of `POST /api/tts`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TtsRequest {
    /// Text to speak
    #[validate(length(min = 1, max = 4096, message = "must be between 1 and 4096 characters"))]
    #[schema(example = "Hello world")]
    pub text: String,
    /// Voice identifier, engine default when absent
    #[serde(default)]
    pub voice: Option<String>,
    /// Speaking speed multiplier, 1.0 when absent
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub speed: Option<f64>,
}

impl TryFrom<TtsRequest> for SynthesisRequest {
    type Error = DomainError;

    fn try_from(request: TtsRequest) -> Result<Self, Self::Error> {
        let speed = request
            .speed
            .map_or(Ok(SpeakingSpeed::NORMAL), SpeakingSpeed::new)?;
        Ok(Self::new(request.text)?
            .with_voice(request.voice)
            .with_speed(speed))
    }
}

/// Body of `POST /v1/audio/speech`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OpenAiSpeechRequest {
    /// Model name; accepted for compatibility and not used for routing
    #[schema(example = "tts-1")]
    pub model: String,
    /// Text to speak
    #[validate(length(min = 1, max = 4096, message = "must be between 1 and 4096 characters"))]
    pub input: String,
    /// Voice identifier
    #[serde(default)]
    pub voice: Option<String>,
    /// Output container; only `wav` is produced
    #[serde(default)]
    #[schema(example = "wav")]
    pub response_format: Option<String>,
    /// Speaking speed multiplier, 1.0 when absent
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub speed: Option<f64>,
}

impl OpenAiSpeechRequest {
    /// Map to a synthesis request
    ///
    /// An absent or empty `response_format` means WAV.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::UnsupportedFormat` for any other format, and
    /// `SpeechError::InvalidRequest` for empty input or a non-positive speed.
    pub fn into_synthesis_request(self) -> Result<SynthesisRequest, SpeechError> {
        if let Some(format) = self.response_format.as_deref().filter(|f| !f.trim().is_empty()) {
            let format: AudioFormat = format.parse()?;
            if format != AudioFormat::Wav {
                return Err(SpeechError::UnsupportedFormat(format!(
                    "'{format}' (only 'wav' response_format is supported)"
                )));
            }
        }

        let request = TtsRequest {
            text: self.input,
            voice: self.voice,
            speed: self.speed,
        };
        Ok(SynthesisRequest::try_from(request)?)
    }
}

/// Response of `POST /api/stt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SttResponse {
    /// Recognized text
    pub text: String,
    /// Audio length in seconds
    pub duration: Option<f64>,
}

impl From<Transcription> for SttResponse {
    fn from(transcription: Transcription) -> Self {
        Self {
            text: transcription.text,
            duration: transcription.duration_secs,
        }
    }
}

/// Response of `POST /v1/audio/transcriptions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OpenAiTranscriptionResponse {
    /// Recognized text
    pub text: String,
    /// Model name as sent by the caller
    pub model: String,
}

impl OpenAiTranscriptionResponse {
    /// Pair a transcription with the requested model name
    pub fn new(transcription: Transcription, model: impl Into<String>) -> Self {
        Self {
            text: transcription.text,
            model: model.into(),
        }
    }
}
