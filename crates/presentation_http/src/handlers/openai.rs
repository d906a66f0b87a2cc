//! OpenAI-compatible audio endpoints
//!
//! Same engines as the native routes, OpenAI request and response shapes.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::Response,
};
use tracing::instrument;

use crate::{
    adapters::{DEFAULT_TRANSCRIPTION_MODEL, OpenAiSpeechRequest, OpenAiTranscriptionResponse},
    error::ApiError,
    handlers::{common::read_upload, speech::synthesize},
    middleware::ValidatedJson,
    state::AppState,
};

/// `POST /v1/audio/speech`
#[utoipa::path(
    post,
    path = "/v1/audio/speech",
    tag = "openai",
    request_body = OpenAiSpeechRequest,
    responses(
        (status = 200, description = "WAV audio", content_type = "audio/wav", body = Vec<u8>),
        (status = 400, description = "Invalid request or unsupported response_format", body = crate::error::ErrorResponse),
        (status = 500, description = "Engine unavailable or synthesis failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(model = %request.model, format = ?request.response_format))]
pub async fn audio_speech(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OpenAiSpeechRequest>,
) -> Result<Response, ApiError> {
    let request = request.into_synthesis_request()?;
    synthesize(&state, &request).await
}

/// `POST /v1/audio/transcriptions`
#[utoipa::path(
    post,
    path = "/v1/audio/transcriptions",
    tag = "openai",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "`file` part with the audio, optional `model` text part"),
    responses(
        (status = 200, description = "Transcription", body = OpenAiTranscriptionResponse),
        (status = 400, description = "No file provided or undecodable audio", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Model missing or transcription failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn audio_transcriptions(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OpenAiTranscriptionResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let model_name = upload
        .model
        .unwrap_or_else(|| DEFAULT_TRANSCRIPTION_MODEL.to_string());

    let model = state.registry.stt_model().await?;
    let transcription = model.transcribe(upload.audio).await?;

    Ok(Json(OpenAiTranscriptionResponse::new(
        transcription,
        model_name,
    )))
}
