//! WAV container encoding and decoding
//!
//! Wraps 16-bit PCM buffers in an uncompressed RIFF/WAVE container and reads
//! them back. Mono and stereo buffers get the canonical 44-byte header
//! (`RIFF`, `fmt ` with PCM tag 1, `data`).

use std::io::Cursor;

use domain::PcmBuffer;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::SpeechError;

/// Bits per sample for every container this module writes
pub const BITS_PER_SAMPLE: u16 = 16;

/// Header fields of a WAV file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    /// Number of channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Number of frames in the data chunk
    pub frames: u32,
}

impl WavInfo {
    /// Playback duration in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.frames) / f64::from(self.sample_rate)
    }

    /// Whether this is 16 kHz mono 16-bit PCM, the layout speech models expect
    #[must_use]
    pub const fn is_speech_ready(&self) -> bool {
        self.channels == 1 && self.sample_rate == 16_000 && self.bits_per_sample == 16
    }
}

const fn spec_for(buffer: &PcmBuffer) -> WavSpec {
    WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Encode a PCM buffer as a WAV file
///
/// # Errors
///
/// Returns `SpeechError::AudioProcessing` if the writer fails, which only
/// happens for buffers too large for a RIFF container (4 GiB).
pub fn encode(buffer: &PcmBuffer) -> Result<Vec<u8>, SpeechError> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + buffer.samples().len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec_for(buffer))?;
        for &sample in buffer.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// Decode a 16-bit integer PCM WAV file
///
/// # Errors
///
/// Returns `SpeechError::InvalidAudio` if the bytes are not a WAV file or use
/// a sample format other than 16-bit integer PCM.
pub fn decode(bytes: &[u8]) -> Result<PcmBuffer, SpeechError> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(SpeechError::InvalidAudio(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()?;

    PcmBuffer::new(samples, spec.channels, spec.sample_rate)
        .map_err(|e| SpeechError::InvalidAudio(e.to_string()))
}

/// Interpret headerless little-endian 16-bit PCM, dropping a trailing odd byte
#[must_use]
pub fn samples_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Read the header of a WAV file without decoding its samples
///
/// # Errors
///
/// Returns `SpeechError::InvalidAudio` if the bytes are not a WAV file.
pub fn probe(bytes: &[u8]) -> Result<WavInfo, SpeechError> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        frames: reader.duration(),
    })
}
