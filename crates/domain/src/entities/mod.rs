//! Domain entities - per-request audio and speech objects

mod pcm_buffer;
mod synthesis_request;
mod transcription;

pub use pcm_buffer::PcmBuffer;
pub use synthesis_request::SynthesisRequest;
pub use transcription::Transcription;
