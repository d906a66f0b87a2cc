//! Speech-to-text result entity

use serde::{Deserialize, Serialize};

/// Result of speech-to-text transcription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Duration of the audio in seconds (if known)
    pub duration_secs: Option<f64>,
    /// Language the audio was transcribed as (ISO 639-1 code)
    pub language: Option<String>,
}

impl Transcription {
    /// Create a transcription with just text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration_secs: None,
            language: None,
        }
    }

    /// Set the audio duration
    #[must_use]
    pub const fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    /// Set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Check if nothing was recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
