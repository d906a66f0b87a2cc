//! Application configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults (serde defaults on every field)
//! 2. `config.toml` (or any format the `config` crate reads) in the working
//!    directory, optional
//! 3. environment variables prefixed with `SPEECHGATE`, nested with `__`,
//!    e.g. `SPEECHGATE__SERVER__PORT=8080`
//! 4. `WHISPER_MODEL_DIR`, which sets `speech.stt.model_dir`

mod server;

use ai_speech::SpeechConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use server::{LogFormat, ServerConfig};

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "SPEECHGATE";

/// Environment variable overriding the whisper model directory
pub const WHISPER_MODEL_DIR_ENV: &str = "WHISPER_MODEL_DIR";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Speech engine settings
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from `config.*` and the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit file stem and environment map
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result fails
    /// validation.
    pub fn load_from(
        file_stem: &str,
        env: config::Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let whisper_dir = env
            .get(WHISPER_MODEL_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .cloned();

        let builder = Config::builder()
            .add_source(File::with_name(file_stem).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .source(Some(env)),
            )
            .set_override_option("speech.stt.model_dir", whisper_dir)?;

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate().map_err(ConfigError::Message)?;

        debug!(
            bind = %config.server.bind_address(),
            tts_engine = ?config.speech.tts.engine,
            whisper_dir = %config.speech.stt.model_dir.display(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.trim().is_empty() {
            return Err("Server host must not be empty".to_string());
        }
        if self.server.max_body_size_audio_bytes == 0 || self.server.max_body_size_json_bytes == 0
        {
            return Err("Body size limits must be greater than 0".to_string());
        }
        self.speech.validate()
    }
}
