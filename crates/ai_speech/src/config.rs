//! Configuration for speech processing

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the speech engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Construct both engines at startup instead of on first request
    #[serde(default = "default_preload")]
    pub preload: bool,

    /// Path to the FFmpeg executable used to normalize uploads
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Text-to-speech engine settings
    #[serde(default)]
    pub tts: TtsConfig,

    /// Speech-to-text engine settings
    #[serde(default)]
    pub stt: SttConfig,
}

/// Which engine serves text-to-speech requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngineKind {
    /// Placeholder 440 Hz tone
    #[default]
    Tone,
    /// Piper CLI with ONNX voice models
    Piper,
}

/// Text-to-speech settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Engine selection
    #[serde(default)]
    pub engine: TtsEngineKind,

    /// Directory holding `<voice>.onnx` and `<voice>.onnx.json` files
    #[serde(default = "default_tts_model_dir")]
    pub model_dir: PathBuf,

    /// Path to the Piper executable
    #[serde(default = "default_piper_path")]
    pub executable_path: PathBuf,

    /// Voice used when a request names none
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Seconds of silence between sentences
    #[serde(default = "default_sentence_silence")]
    pub sentence_silence: f32,
}

/// Speech-to-text settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttConfig {
    /// Directory holding the whisper.cpp model (`WHISPER_MODEL_DIR`)
    #[serde(default = "default_stt_model_dir")]
    pub model_dir: PathBuf,

    /// Model file name inside `model_dir`
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// Path to the whisper.cpp CLI
    #[serde(default = "default_whisper_path")]
    pub executable_path: PathBuf,

    /// Number of CPU threads
    #[serde(default = "default_threads")]
    pub threads: u32,

    /// Spoken language (ISO 639-1) or `auto`
    #[serde(default = "default_language")]
    pub language: String,
}

const fn default_preload() -> bool {
    true
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_tts_model_dir() -> PathBuf {
    PathBuf::from("./models/piper")
}

fn default_piper_path() -> PathBuf {
    PathBuf::from("piper")
}

fn default_voice() -> String {
    "en_US-lessac-medium".to_string()
}

const fn default_sentence_silence() -> f32 {
    0.2
}

fn default_stt_model_dir() -> PathBuf {
    PathBuf::from("./models/whisper-small")
}

fn default_model_file() -> String {
    "ggml-small.bin".to_string()
}

fn default_whisper_path() -> PathBuf {
    PathBuf::from("whisper-cli")
}

const fn default_threads() -> u32 {
    4
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            preload: default_preload(),
            ffmpeg_path: default_ffmpeg_path(),
            tts: TtsConfig::default(),
            stt: SttConfig::default(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            engine: TtsEngineKind::default(),
            model_dir: default_tts_model_dir(),
            executable_path: default_piper_path(),
            default_voice: default_voice(),
            sentence_silence: default_sentence_silence(),
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model_dir: default_stt_model_dir(),
            model_file: default_model_file(),
            executable_path: default_whisper_path(),
            threads: default_threads(),
            language: default_language(),
        }
    }
}

impl SttConfig {
    /// Full path of the model file
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }
}

impl SpeechConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err("FFmpeg path must not be empty".to_string());
        }

        if self.tts.executable_path.as_os_str().is_empty() {
            return Err("Piper executable path must not be empty".to_string());
        }
        if self.tts.default_voice.trim().is_empty() {
            return Err("Default voice must not be empty".to_string());
        }
        if self.tts.sentence_silence.is_nan() || self.tts.sentence_silence < 0.0 {
            return Err(format!(
                "Sentence silence must be non-negative, got {}",
                self.tts.sentence_silence
            ));
        }

        if self.stt.executable_path.as_os_str().is_empty() {
            return Err("whisper.cpp executable path must not be empty".to_string());
        }
        if self.stt.model_file.trim().is_empty() {
            return Err("STT model file must not be empty".to_string());
        }
        if self.stt.threads == 0 {
            return Err("STT threads must be greater than 0".to_string());
        }

        Ok(())
    }
}
