//! Property-based tests for the audio data model
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{PcmBuffer, SpeakingSpeed, SynthesisRequest};
use proptest::prelude::*;

// ============================================================================
// PcmBuffer Property Tests
// ============================================================================

mod pcm_buffer_tests {
    use super::*;

    proptest! {
        #[test]
        fn whole_frames_are_accepted(
            frames in 0usize..256,
            channels in 1u16..=8,
            sample_rate in 1u32..=192_000
        ) {
            let samples = vec![0i16; frames * usize::from(channels)];
            let buffer = PcmBuffer::new(samples, channels, sample_rate);
            prop_assert!(buffer.is_ok());

            let buffer = buffer.unwrap();
            prop_assert_eq!(buffer.frame_count(), frames);
            prop_assert_eq!(buffer.channels(), channels);
        }

        #[test]
        fn partial_frames_are_rejected(
            frames in 0usize..256,
            channels in 2u16..=8,
            extra in 1usize..8
        ) {
            let extra = extra % usize::from(channels);
            prop_assume!(extra != 0);

            let samples = vec![0i16; frames * usize::from(channels) + extra];
            prop_assert!(PcmBuffer::new(samples, channels, 16_000).is_err());
        }

        #[test]
        fn duration_matches_frames_over_rate(
            frames in 0usize..48_000,
            sample_rate in 8_000u32..=48_000
        ) {
            let buffer = PcmBuffer::mono(vec![0; frames], sample_rate).unwrap();
            let expected = frames as f64 / f64::from(sample_rate);
            prop_assert!((buffer.duration_secs() - expected).abs() < 1e-12);
        }
    }
}

// ============================================================================
// SpeakingSpeed Property Tests
// ============================================================================

mod speaking_speed_tests {
    use super::*;

    proptest! {
        #[test]
        fn positive_speeds_accepted(value in 0.001f64..100.0f64) {
            let speed = SpeakingSpeed::new(value);
            prop_assert!(speed.is_ok());
            prop_assert!((speed.unwrap().value() - value).abs() < f64::EPSILON);
        }

        #[test]
        fn non_positive_speeds_rejected(value in -100.0f64..=0.0f64) {
            prop_assert!(SpeakingSpeed::new(value).is_err());
        }
    }
}

// ============================================================================
// SynthesisRequest Property Tests
// ============================================================================

mod synthesis_request_tests {
    use super::*;

    proptest! {
        #[test]
        fn non_blank_text_accepted(text in "[a-zA-Z0-9 ]{0,40}[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}") {
            let request = SynthesisRequest::new(text.clone());
            prop_assert!(request.is_ok());
            let request = request.unwrap();
            prop_assert_eq!(request.text(), text.as_str());
        }

        #[test]
        fn blank_text_rejected(text in "[ \t\n]{0,20}") {
            prop_assert!(SynthesisRequest::new(text).is_err());
        }
    }
}
