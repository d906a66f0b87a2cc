//! Audio normalization for speech recognition
//!
//! whisper.cpp expects 16 kHz mono 16-bit PCM WAV. Uploads already in that
//! layout pass through untouched; everything else is decoded by FFmpeg into
//! raw PCM and re-wrapped by the WAV encoder.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use domain::PcmBuffer;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::types::{AudioData, AudioFormat};
use crate::wav;

/// Sample rate speech models are fed with
pub const SPEECH_SAMPLE_RATE: u32 = 16_000;

/// Audio converter backed by the FFmpeg CLI
#[derive(Debug, Clone)]
pub struct AudioConverter {
    ffmpeg_path: PathBuf,
}

impl Default for AudioConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioConverter {
    /// Create a converter that runs `ffmpeg` from PATH
    #[must_use]
    pub fn new() -> Self {
        Self::with_ffmpeg_path("ffmpeg")
    }

    /// Create a converter with a custom FFmpeg path
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: path.into(),
        }
    }

    /// FFmpeg binary path
    #[must_use]
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Normalize audio to 16 kHz mono 16-bit PCM WAV
    ///
    /// The returned audio carries its playback duration.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::InvalidAudio` for empty input or input FFmpeg
    /// cannot decode, and `SpeechError::NotAvailable` if FFmpeg is missing.
    #[instrument(skip(self, audio), fields(input_format = %audio.format(), size = audio.data().len()))]
    pub async fn to_speech_wav(&self, audio: &AudioData) -> Result<AudioData, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("audio is empty".to_string()));
        }

        if audio.format() == AudioFormat::Wav {
            if let Ok(info) = wav::probe(audio.data()) {
                if info.is_speech_ready() {
                    debug!("Audio already speech-ready, skipping conversion");
                    return Ok(AudioData::new(audio.data().to_vec(), AudioFormat::Wav)
                        .with_duration(info.duration_secs()));
                }
            }
        }

        let samples = wav::samples_from_le_bytes(&self.decode_to_pcm(audio.data()).await?);
        let buffer = PcmBuffer::mono(samples, SPEECH_SAMPLE_RATE)?;
        let duration = buffer.duration_secs();

        debug!(frames = buffer.frame_count(), "Normalized audio with FFmpeg");

        Ok(AudioData::new(wav::encode(&buffer)?, AudioFormat::Wav).with_duration(duration))
    }

    /// Run FFmpeg, returning headerless little-endian 16 kHz mono PCM
    async fn decode_to_pcm(&self, input: &[u8]) -> Result<Vec<u8>, SpeechError> {
        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.args(["-hide_banner", "-loglevel", "error", "-i", "pipe:0"])
            .args(["-f", "s16le", "-codec:a", "pcm_s16le", "-ac", "1"])
            .arg("-ar")
            .arg(SPEECH_SAMPLE_RATE.to_string())
            .arg("pipe:1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::NotAvailable(format!(
                    "FFmpeg not found at '{}'",
                    self.ffmpeg_path.display()
                ))
            } else {
                SpeechError::AudioProcessing(format!("Failed to spawn FFmpeg: {e}"))
            }
        })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            SpeechError::AudioProcessing("FFmpeg stdin was not captured".to_string())
        })?;

        // Feed stdin while draining stdout so neither pipe fills up
        let feed = async move {
            // FFmpeg may stop reading early on bad input; its exit status reports that
            let _ = stdin.write_all(input).await;
            drop(stdin);
        };
        let ((), output) = tokio::join!(feed, child.wait_with_output());
        let output = output
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to wait for FFmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::InvalidAudio(format!(
                "FFmpeg could not decode audio: {}",
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}
