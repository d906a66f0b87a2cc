//! Speech engine implementations
//!
//! Concrete adapters for the `SpeechToText` and `TextToSpeech` ports.

pub mod piper;
pub mod tone;
pub mod whisper_cpp;

pub use piper::PiperProvider;
pub use tone::ToneSynthesizer;
pub use whisper_cpp::WhisperCppProvider;
