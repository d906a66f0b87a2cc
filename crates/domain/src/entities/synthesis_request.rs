//! Text-to-speech request entity

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::SpeakingSpeed;

/// A validated request to synthesize speech
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    text: String,
    voice: Option<String>,
    speed: SpeakingSpeed,
}

impl SynthesisRequest {
    /// Create a request at normal speed with the engine's default voice
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyText` if the text is empty or whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyText);
        }

        Ok(Self {
            text,
            voice: None,
            speed: SpeakingSpeed::NORMAL,
        })
    }

    /// Select a voice; blank identifiers fall back to the default voice
    #[must_use]
    pub fn with_voice(mut self, voice: Option<String>) -> Self {
        self.voice = voice.filter(|v| !v.trim().is_empty());
        self
    }

    /// Set the speaking speed
    #[must_use]
    pub const fn with_speed(mut self, speed: SpeakingSpeed) -> Self {
        self.speed = speed;
        self
    }

    /// Text to synthesize
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Requested voice, if any
    #[must_use]
    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Speaking speed
    #[must_use]
    pub const fn speed(&self) -> SpeakingSpeed {
        self.speed
    }
}
