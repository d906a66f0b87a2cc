//! Domain layer for SpeechGate
//!
//! Contains the transient data model shared by the speech engines and the
//! HTTP layer: PCM buffers, synthesis requests and transcription results.
//! Nothing here is persisted; every value lives for a single request.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
