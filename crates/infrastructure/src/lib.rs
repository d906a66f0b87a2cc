//! Infrastructure layer - configuration for SpeechGate
//!
//! Loads [`AppConfig`] from defaults, an optional `config.*` file, prefixed
//! environment variables and the `WHISPER_MODEL_DIR` override.

pub mod config;

pub use config::{AppConfig, ENV_PREFIX, LogFormat, ServerConfig, WHISPER_MODEL_DIR_ENV};
