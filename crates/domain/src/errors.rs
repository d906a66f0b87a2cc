//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// PCM buffer violates its shape invariants
    #[error("Invalid audio buffer: {0}")]
    InvalidAudioBuffer(String),

    /// Text to synthesize is empty or whitespace only
    #[error("Text must not be empty")]
    EmptyText,

    /// Speaking speed is not a positive finite number
    #[error("Invalid speed: {0} (must be a positive number)")]
    InvalidSpeed(f64),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
