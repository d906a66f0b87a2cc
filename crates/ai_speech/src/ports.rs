//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech engines must implement. The HTTP
//! layer only ever sees these traits, handed out by the model registry.

use async_trait::async_trait;
use domain::{SynthesisRequest, Transcription};

use crate::error::SpeechError;
use crate::types::AudioData;

/// Port for Speech-to-Text (STT) implementations
///
/// # Example
///
/// ```ignore
/// use ai_speech::{AudioData, SpeechToText};
///
/// async fn transcribe_upload(
///     stt: &dyn SpeechToText,
///     audio: AudioData,
/// ) -> Result<String, SpeechError> {
///     let transcription = stt.transcribe(audio).await?;
///     Ok(transcription.text)
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the audio cannot be decoded or the engine
    /// fails.
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError>;

    /// Name of the loaded model
    fn model_name(&self) -> &str;
}

/// Port for Text-to-Speech (TTS) implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech, returning a WAV clip
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the voice is unknown or synthesis fails.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SpeechError>;

    /// Engine identifier
    fn engine_name(&self) -> &str;

    /// Whether this engine only produces a stand-in signal
    fn is_placeholder(&self) -> bool {
        false
    }
}
