//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document for the SpeechGate HTTP API as JSON.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::{adapters, handlers, state::AppState};

/// Path the document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for SpeechGate
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SpeechGate API",
        description = "Local text-to-speech and speech-to-text gateway with OpenAI-compatible audio routes",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and engine state"),
        (name = "speech", description = "Native TTS and STT endpoints"),
        (name = "openai", description = "OpenAI-compatible audio endpoints")
    ),
    paths(
        handlers::health::health_check,
        handlers::speech::text_to_speech,
        handlers::speech::speech_to_text,
        handlers::openai::audio_speech,
        handlers::openai::audio_transcriptions,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            adapters::TtsRequest,
            adapters::SttResponse,
            adapters::OpenAiSpeechRequest,
            adapters::OpenAiTranscriptionResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Router serving the OpenAPI document
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().route(OPENAPI_PATH, get(openapi_json))
}
