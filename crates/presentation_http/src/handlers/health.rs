//! Health check handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the server answers
    pub status: String,
    /// A real TTS engine has been built
    pub tts: bool,
    /// The STT model has been built
    pub stt: bool,
}

/// Liveness plus engine state
///
/// Never builds an engine itself; it reports what the registry holds.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        tts: state.registry.tts_loaded(),
        stt: state.registry.stt_loaded(),
    })
}
