//! Whisper.cpp Local Speech-to-Text Provider
//!
//! Implements `SpeechToText` using the whisper.cpp CLI.
//!
//! # Prerequisites
//!
//! - whisper.cpp must be installed (`whisper-cli` in PATH, or configured via
//!   `speech.stt.executable_path`)
//! - A GGML model in the model directory, `ggml-small.bin` by default
//!   (`speechgate-cli download-model` fetches it)
//!
//! ```bash
//! git clone https://github.com/ggerganov/whisper.cpp
//! cd whisper.cpp && cmake -B build && cmake --build build -j --config Release
//! sudo cp build/bin/whisper-cli /usr/local/bin/
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use domain::Transcription;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::config::SttConfig;
use crate::converter::AudioConverter;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::AudioData;

/// Local STT provider using whisper.cpp
#[derive(Debug, Clone)]
pub struct WhisperCppProvider {
    config: SttConfig,
    model_path: PathBuf,
    model_name: String,
    converter: AudioConverter,
}

impl WhisperCppProvider {
    /// Create a new whisper.cpp provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::ModelNotFound` if the model directory or the
    /// model file inside it does not exist.
    pub fn new(config: SttConfig, converter: AudioConverter) -> Result<Self, SpeechError> {
        if !config.model_dir.is_dir() {
            return Err(SpeechError::model_not_found(&config.model_dir));
        }

        let model_path = config.model_path();
        if !model_path.is_file() {
            return Err(SpeechError::model_not_found(model_path));
        }

        let model_name = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("whisper.cpp")
            .to_string();

        Ok(Self {
            config,
            model_path,
            model_name,
            converter,
        })
    }

    fn executable(&self) -> &Path {
        &self.config.executable_path
    }

    /// Run whisper.cpp on a 16 kHz mono WAV file
    #[instrument(skip(self, audio_path), fields(model = %self.model_path.display()))]
    async fn run_whisper(&self, audio_path: &Path) -> Result<String, SpeechError> {
        let mut cmd = Command::new(self.executable());

        cmd.arg("-m")
            .arg(&self.model_path)
            .arg("-f")
            .arg(audio_path)
            .arg("-l")
            .arg(&self.config.language)
            .arg("-t")
            .arg(self.config.threads.to_string())
            .arg("-nt")
            .arg("-np")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running whisper.cpp: {:?}", cmd);

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::NotAvailable(format!(
                    "whisper.cpp not found at '{}'. Please install whisper.cpp.",
                    self.executable().display()
                ))
            } else {
                SpeechError::TranscriptionFailed(format!("Failed to run whisper.cpp: {e}"))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("whisper.cpp failed: {}", stderr);
            return Err(SpeechError::TranscriptionFailed(format!(
                "whisper.cpp exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(join_segments(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Write audio data to a temporary WAV file, removed when dropped
    async fn write_temp_audio(audio: &AudioData) -> Result<NamedTempFile, SpeechError> {
        let temp_file = NamedTempFile::with_suffix(".wav").map_err(|e| {
            SpeechError::TranscriptionFailed(format!("Failed to create temp file: {e}"))
        })?;

        tokio::fs::write(temp_file.path(), audio.data())
            .await
            .map_err(|e| {
                SpeechError::TranscriptionFailed(format!("Failed to write temp file: {e}"))
            })?;

        Ok(temp_file)
    }
}

/// Join whisper.cpp segment lines into a single transcript
fn join_segments(stdout: &str) -> String {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl SpeechToText for WhisperCppProvider {
    #[instrument(skip(self, audio), fields(format = %audio.format(), size = audio.data().len()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        let normalized = self.converter.to_speech_wav(&audio).await?;
        let temp_file = Self::write_temp_audio(&normalized).await?;

        let text = self.run_whisper(temp_file.path()).await?;
        if text.is_empty() {
            warn!("whisper.cpp returned empty transcription");
        }

        let mut transcription = Transcription::new(text);
        if let Some(duration) = normalized.duration_secs() {
            transcription = transcription.with_duration(duration);
        }
        if self.config.language != "auto" {
            transcription = transcription.with_language(self.config.language.clone());
        }
        Ok(transcription)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
