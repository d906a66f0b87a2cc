//! Speech processing errors

use std::path::PathBuf;

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Request data violates the domain model
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// Model directory or file missing on disk
    #[error("Model not found at {}", path.display())]
    ModelNotFound {
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// Invalid audio format or corrupted data
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Requested output format is not produced by this gateway
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Transcription failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Voice not found
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Audio processing/conversion failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),

    /// Engine binary not available (not installed or not on PATH)
    #[error("Provider not available: {0}")]
    NotAvailable(String),
}

impl SpeechError {
    /// Create a model-not-found error
    pub fn model_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ModelNotFound { path: path.into() }
    }

    /// Whether the error was caused by the caller's input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::InvalidAudio(_)
                | Self::UnsupportedFormat(_)
                | Self::VoiceNotFound(_)
        )
    }
}

impl From<hound::Error> for SpeechError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) if e.kind() != std::io::ErrorKind::UnexpectedEof => {
                Self::AudioProcessing(e.to_string())
            },
            other => Self::InvalidAudio(other.to_string()),
        }
    }
}
