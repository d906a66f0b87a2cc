//! Piper Local Text-to-Speech Provider
//!
//! Implements `TextToSpeech` using the Piper CLI.
//!
//! # Prerequisites
//!
//! - Piper must be installed and available in PATH (or configured via
//!   `speech.tts.executable_path`)
//! - Voice models (`<voice>.onnx`) and their configs (`<voice>.onnx.json`)
//!   in `speech.tts.model_dir`
//!
//! ```bash
//! mkdir -p models/piper && cd models/piper
//! wget https://huggingface.co/rhasspy/piper-voices/resolve/main/en/en_US/lessac/medium/en_US-lessac-medium.onnx
//! wget https://huggingface.co/rhasspy/piper-voices/resolve/main/en/en_US/lessac/medium/en_US-lessac-medium.onnx.json
//! ```
//!
//! Piper is run with `--output-raw`, so stdout carries headerless 16-bit
//! mono PCM at the voice's sample rate. The provider wraps it in a WAV
//! container itself.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use domain::{PcmBuffer, SynthesisRequest};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::config::TtsConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};
use crate::wav;

/// Sample rate Piper voices use when their config does not say
pub const DEFAULT_VOICE_SAMPLE_RATE: u32 = 22_050;

/// A voice model on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceModel {
    /// Voice identifier
    pub name: String,
    /// Path of the `.onnx` model
    pub model_path: PathBuf,
    /// Path of the `.onnx.json` config, if present
    pub config_path: Option<PathBuf>,
    /// Output sample rate
    pub sample_rate: u32,
}

#[derive(Debug, Deserialize)]
struct VoiceConfigFile {
    #[serde(default)]
    audio: VoiceAudioConfig,
}

#[derive(Debug, Default, Deserialize)]
struct VoiceAudioConfig {
    sample_rate: Option<u32>,
}

/// Local TTS provider using Piper
#[derive(Debug, Clone)]
pub struct PiperProvider {
    config: TtsConfig,
}

impl PiperProvider {
    /// Create a new Piper provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::ModelNotFound` if the voice directory does not
    /// exist.
    pub fn new(config: TtsConfig) -> Result<Self, SpeechError> {
        if !config.model_dir.is_dir() {
            return Err(SpeechError::model_not_found(&config.model_dir));
        }
        Ok(Self { config })
    }

    fn executable(&self) -> &Path {
        &self.config.executable_path
    }

    /// Resolve a voice name (or the default voice) to its model files
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::VoiceNotFound` if the name is not a plain file
    /// stem or no model exists for it, and `SpeechError::Configuration` if
    /// the voice config is not valid JSON.
    pub async fn resolve_voice(&self, voice: Option<&str>) -> Result<VoiceModel, SpeechError> {
        let name = voice.unwrap_or(&self.config.default_voice);

        let is_plain = !name.is_empty()
            && name != ".."
            && !name.contains(['/', '\\'])
            && Path::new(name).file_name().is_some();
        if !is_plain {
            return Err(SpeechError::VoiceNotFound(name.to_string()));
        }

        let model_path = self.config.model_dir.join(format!("{name}.onnx"));
        if !tokio::fs::try_exists(&model_path).await.unwrap_or(false) {
            return Err(SpeechError::VoiceNotFound(name.to_string()));
        }

        let config_path = self.config.model_dir.join(format!("{name}.onnx.json"));
        let (config_path, sample_rate) = match tokio::fs::read(&config_path).await {
            Ok(raw) => {
                let parsed: VoiceConfigFile = serde_json::from_slice(&raw).map_err(|e| {
                    SpeechError::Configuration(format!(
                        "Invalid voice config {}: {e}",
                        config_path.display()
                    ))
                })?;
                let rate = parsed
                    .audio
                    .sample_rate
                    .filter(|r| *r > 0)
                    .unwrap_or(DEFAULT_VOICE_SAMPLE_RATE);
                (Some(config_path), rate)
            },
            Err(e) => {
                warn!(voice = %name, error = %e, "Voice config unreadable, assuming {DEFAULT_VOICE_SAMPLE_RATE} Hz");
                (None, DEFAULT_VOICE_SAMPLE_RATE)
            },
        };

        Ok(VoiceModel {
            name: name.to_string(),
            model_path,
            config_path,
            sample_rate,
        })
    }

    /// Run Piper, returning raw little-endian PCM
    #[instrument(skip(self, text, voice), fields(voice = %voice.name, text_len = text.len()))]
    async fn run_piper(
        &self,
        text: &str,
        voice: &VoiceModel,
        length_scale: f32,
    ) -> Result<Vec<u8>, SpeechError> {
        let mut cmd = Command::new(self.executable());

        cmd.arg("--model").arg(&voice.model_path);
        if let Some(config_path) = &voice.config_path {
            cmd.arg("--config").arg(config_path);
        }
        cmd.arg("--output-raw")
            .arg("--length_scale")
            .arg(length_scale.to_string())
            .arg("--sentence_silence")
            .arg(self.config.sentence_silence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running piper: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::NotAvailable(format!(
                    "Piper not found at '{}'. Please install Piper.",
                    self.executable().display()
                ))
            } else {
                SpeechError::SynthesisFailed(format!("Failed to run piper: {e}"))
            }
        })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            SpeechError::SynthesisFailed("Piper stdin was not captured".to_string())
        })?;

        let feed = async move {
            let result = stdin.write_all(text.as_bytes()).await;
            drop(stdin);
            result
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());

        let output = output
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to wait for piper: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Piper failed: {}", stderr);
            return Err(SpeechError::SynthesisFailed(format!(
                "Piper exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        written.map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to write to piper stdin: {e}"))
        })?;

        if output.stdout.is_empty() {
            warn!("Piper produced empty output");
            return Err(SpeechError::SynthesisFailed(
                "Piper produced empty output".to_string(),
            ));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl TextToSpeech for PiperProvider {
    #[instrument(skip(self, request), fields(text_len = request.text().len(), voice = ?request.voice()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SpeechError> {
        let voice = self.resolve_voice(request.voice()).await?;
        let raw = self
            .run_piper(request.text(), &voice, request.speed().length_scale())
            .await?;

        let buffer = PcmBuffer::mono(wav::samples_from_le_bytes(&raw), voice.sample_rate)?;
        let duration = buffer.duration_secs();
        debug!(
            voice = %voice.name,
            sample_rate = voice.sample_rate,
            duration,
            "Synthesized speech with Piper"
        );

        Ok(AudioData::new(wav::encode(&buffer)?, AudioFormat::Wav).with_duration(duration))
    }

    fn engine_name(&self) -> &str {
        "piper"
    }
}
