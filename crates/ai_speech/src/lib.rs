//! AI Speech - speech engines for SpeechGate
//!
//! Provides the engine ports and their adapters:
//! - `TextToSpeech` - synthesize speech from text (Piper, or the fallback tone)
//! - `SpeechToText` - transcribe audio to text (whisper.cpp)
//!
//! plus the pieces around them: the WAV container codec, the fallback tone
//! generator, FFmpeg-based upload normalization and the [`ModelRegistry`]
//! that builds each engine once and caches it.
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{ModelRegistry, SpeechConfig};
//! use domain::SynthesisRequest;
//!
//! let registry = ModelRegistry::from_config(&SpeechConfig::default());
//! let tts = registry.tts_engine().await?;
//! let audio = tts.synthesize(&SynthesisRequest::new("Hello, world!")?).await?;
//! std::fs::write("hello.wav", audio.data())?;
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod ports;
pub mod providers;
pub mod registry;
pub mod tone;
pub mod types;
pub mod wav;

pub use config::{SpeechConfig, SttConfig, TtsConfig, TtsEngineKind};
pub use converter::AudioConverter;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::{PiperProvider, ToneSynthesizer, WhisperCppProvider};
pub use registry::{ModelRegistry, SttFactory, TtsFactory};
pub use types::{AudioData, AudioFormat};
