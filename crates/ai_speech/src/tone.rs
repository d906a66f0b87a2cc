//! Fallback tone generator
//!
//! Stands in for a real TTS engine: produces a short 440 Hz sine clip whose
//! length follows the length of the text and the requested speed. Output is
//! fully deterministic.

use std::f64::consts::TAU;

use domain::{PcmBuffer, SpeakingSpeed};

use crate::error::SpeechError;
use crate::wav;

/// Sample rate of generated tones
pub const TONE_SAMPLE_RATE: u32 = 16_000;

/// Tone frequency in Hz
pub const TONE_FREQUENCY_HZ: f64 = 440.0;

/// Peak amplitude relative to full scale
pub const TONE_AMPLITUDE: f64 = 0.2;

const CHARS_PER_SECOND: f64 = 20.0;
const MIN_BASE_SECS: f64 = 0.6;
const MAX_BASE_SECS: f64 = 3.0;
const MIN_SPEED: f64 = 0.25;

/// Duration of the tone for `text` at `speed`, in seconds
///
/// `clamp(chars / 20, 0.6, 3.0) / max(speed, 0.25)`, counting Unicode
/// scalar values.
#[must_use]
pub fn tone_duration(text: &str, speed: SpeakingSpeed) -> f64 {
    let chars = text.chars().count() as f64;
    let base = (chars / CHARS_PER_SECOND).clamp(MIN_BASE_SECS, MAX_BASE_SECS);
    base / speed.value().max(MIN_SPEED)
}

/// Number of frames the tone for `text` at `speed` will contain
#[must_use]
pub fn tone_frame_count(text: &str, speed: SpeakingSpeed) -> usize {
    (f64::from(TONE_SAMPLE_RATE) * tone_duration(text, speed)).floor() as usize
}

/// Generate the tone as 16 kHz mono PCM
///
/// # Errors
///
/// Never fails for the fixed tone layout; the `Result` mirrors the
/// buffer constructor.
pub fn generate_tone(text: &str, speed: SpeakingSpeed) -> Result<PcmBuffer, SpeechError> {
    let duration = tone_duration(text, speed);
    let n = tone_frame_count(text, speed);

    let step = duration / n as f64;
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 * step;
            let value = TONE_AMPLITUDE * (TAU * TONE_FREQUENCY_HZ * t).sin();
            (value * f64::from(i16::MAX)) as i16
        })
        .collect();

    Ok(PcmBuffer::mono(samples, TONE_SAMPLE_RATE)?)
}

/// Generate the tone and wrap it in a WAV container
///
/// # Errors
///
/// Propagates encoder failures from [`wav::encode`].
pub fn synthesize_tone(text: &str, speed: SpeakingSpeed) -> Result<Vec<u8>, SpeechError> {
    wav::encode(&generate_tone(text, speed)?)
}
