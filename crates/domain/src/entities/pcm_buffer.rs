//! PCM audio buffer entity

use crate::errors::DomainError;

/// Interleaved signed 16-bit PCM samples with their channel layout
///
/// The buffer is the common currency between the engines and the WAV
/// container code. Samples for multi-channel audio are interleaved frame by
/// frame (`L R L R ...` for stereo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
}

impl PcmBuffer {
    /// Create a new buffer
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAudioBuffer` if `channels` or
    /// `sample_rate` is zero, or if the sample count is not a multiple of the
    /// channel count.
    pub fn new(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Result<Self, DomainError> {
        if channels == 0 {
            return Err(DomainError::InvalidAudioBuffer(
                "channel count must be at least 1".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(DomainError::InvalidAudioBuffer(
                "sample rate must be greater than 0".to_string(),
            ));
        }
        if samples.len() % usize::from(channels) != 0 {
            return Err(DomainError::InvalidAudioBuffer(format!(
                "{} samples cannot be split evenly across {channels} channels",
                samples.len()
            )));
        }

        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Create a single-channel buffer
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAudioBuffer` if `sample_rate` is zero.
    pub fn mono(samples: Vec<i16>, sample_rate: u32) -> Result<Self, DomainError> {
        Self::new(samples, 1, sample_rate)
    }

    /// Interleaved samples
    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of channels
    #[must_use]
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample rate in Hz
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (one sample per channel)
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    /// Playback duration in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / f64::from(self.sample_rate)
    }

    /// Check if the buffer holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_buffer_reports_frames_and_duration() {
        let buffer = PcmBuffer::mono(vec![0; 16_000], 16_000).unwrap();
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.frame_count(), 16_000);
        assert!((buffer.duration_secs() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stereo_frames_are_half_the_samples() {
        let buffer = PcmBuffer::new(vec![1, -1, 2, -2], 2, 8_000).unwrap();
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.samples(), &[1, -1, 2, -2]);
    }

    #[test]
    fn uneven_multichannel_buffer_is_rejected() {
        let result = PcmBuffer::new(vec![1, 2, 3], 2, 44_100);
        assert!(matches!(result, Err(DomainError::InvalidAudioBuffer(_))));
    }

    #[test]
    fn zero_channels_rejected() {
        assert!(PcmBuffer::new(vec![], 0, 16_000).is_err());
    }

    #[test]
    fn zero_sample_rate_rejected() {
        assert!(PcmBuffer::mono(vec![0], 0).is_err());
    }

    #[test]
    fn empty_buffer_is_valid() {
        let buffer = PcmBuffer::new(Vec::new(), 6, 48_000).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.frame_count(), 0);
        assert!(buffer.duration_secs().abs() < f64::EPSILON);
    }
}
