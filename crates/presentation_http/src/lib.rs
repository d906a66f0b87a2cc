//! SpeechGate HTTP presentation layer
//!
//! Routes, handlers and wire adapters for the TTS/STT gateway, plus the
//! error mapping and middleware they share.

pub mod adapters;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::{REQUEST_ID_HEADER, RequestId, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
