//! Speaking speed value object
//!
//! A multiplier applied to synthesized speech. `1.0` is the engine's natural
//! pace, `2.0` twice as fast, `0.5` half as fast.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::SpeakingSpeed;
//!
//! let speed = SpeakingSpeed::new(1.25).expect("valid speed");
//! assert!((speed.value() - 1.25).abs() < f64::EPSILON);
//!
//! assert!(SpeakingSpeed::new(0.0).is_err());
//! assert!(SpeakingSpeed::new(f64::NAN).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Validated speaking speed multiplier (positive and finite)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SpeakingSpeed(f64);

impl SpeakingSpeed {
    /// The engine's natural pace
    pub const NORMAL: Self = Self(1.0);

    /// Create a new validated speed
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSpeed` if the value is zero, negative,
    /// NaN or infinite.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidSpeed(value))
        }
    }

    /// Get the raw multiplier
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Inverse of the speed, i.e. how much longer each phoneme lasts
    ///
    /// Narrowed to `f32` for the engine command line.
    #[must_use]
    pub fn length_scale(self) -> f32 {
        (1.0 / self.0) as f32
    }
}

impl Default for SpeakingSpeed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<f64> for SpeakingSpeed {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpeakingSpeed> for f64 {
    fn from(speed: SpeakingSpeed) -> Self {
        speed.0
    }
}

impl fmt::Display for SpeakingSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_values() {
        assert!(SpeakingSpeed::new(0.01).is_ok());
        assert!(SpeakingSpeed::new(1.0).is_ok());
        assert!(SpeakingSpeed::new(4.0).is_ok());
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(
            SpeakingSpeed::new(0.0),
            Err(DomainError::InvalidSpeed(0.0))
        );
        assert!(SpeakingSpeed::new(-1.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(SpeakingSpeed::new(f64::NAN).is_err());
        assert!(SpeakingSpeed::new(f64::INFINITY).is_err());
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(SpeakingSpeed::default(), SpeakingSpeed::NORMAL);
        assert!((SpeakingSpeed::default().value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn length_scale_is_inverse() {
        let speed = SpeakingSpeed::new(2.0).unwrap();
        assert!((speed.length_scale() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn display_shows_multiplier() {
        let speed = SpeakingSpeed::new(1.5).unwrap();
        assert_eq!(speed.to_string(), "1.5x");
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<SpeakingSpeed, _> = serde_json::from_str("0.75");
        assert!(ok.is_ok());

        let err: Result<SpeakingSpeed, _> = serde_json::from_str("-2.0");
        assert!(err.is_err());
    }
}
