//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Uri,
    middleware,
    routing::{get, post},
};

use crate::{error::ApiError, handlers, middleware::request_id, openapi, state::AppState};

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Create the main router with all routes
///
/// Upload routes take bodies up to `server.max_body_size_audio_bytes`,
/// JSON routes up to `server.max_body_size_json_bytes`.
pub fn create_router(state: AppState) -> Router {
    let audio_limit = DefaultBodyLimit::max(state.config.server.max_body_size_audio_bytes);
    let json_limit = DefaultBodyLimit::max(state.config.server.max_body_size_json_bytes);

    Router::new()
        // Health
        .route("/healthz", get(handlers::health::health_check))
        // Native speech API
        .route(
            "/api/tts",
            post(handlers::speech::text_to_speech).layer(json_limit),
        )
        .route(
            "/api/stt",
            post(handlers::speech::speech_to_text).layer(audio_limit),
        )
        // OpenAI-compatible audio API
        .route(
            "/v1/audio/speech",
            post(handlers::openai::audio_speech).layer(json_limit),
        )
        .route(
            "/v1/audio/transcriptions",
            post(handlers::openai::audio_transcriptions).layer(audio_limit),
        )
        .merge(openapi::create_openapi_routes())
        .fallback(not_found)
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}
