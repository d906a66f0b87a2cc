//! Native speech endpoints

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::Response,
};
use domain::SynthesisRequest;
use tracing::{debug, instrument};

use crate::{
    adapters::{SttResponse, TtsRequest},
    error::ApiError,
    handlers::common::{audio_response, read_upload},
    middleware::ValidatedJson,
    state::AppState,
};

/// Synthesize speech as WAV
#[utoipa::path(
    post,
    path = "/api/tts",
    tag = "speech",
    request_body = TtsRequest,
    responses(
        (status = 200, description = "WAV audio", content_type = "audio/wav", body = Vec<u8>),
        (status = 400, description = "Invalid request or unknown voice", body = crate::error::ErrorResponse),
        (status = 500, description = "Engine unavailable or synthesis failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn text_to_speech(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TtsRequest>,
) -> Result<Response, ApiError> {
    let request = SynthesisRequest::try_from(request)?;
    synthesize(&state, &request).await
}

/// Run a synthesis request through the registry's TTS engine
pub(crate) async fn synthesize(
    state: &AppState,
    request: &SynthesisRequest,
) -> Result<Response, ApiError> {
    let engine = state.registry.tts_engine().await?;
    let audio = engine.synthesize(request).await?;

    debug!(
        engine = engine.engine_name(),
        bytes = audio.data().len(),
        duration = audio.duration_secs(),
        "Synthesized speech"
    );

    Ok(audio_response(audio))
}

/// Transcribe an uploaded audio file
#[utoipa::path(
    post,
    path = "/api/stt",
    tag = "speech",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "`file` part with the audio"),
    responses(
        (status = 200, description = "Transcription", body = SttResponse),
        (status = 400, description = "No file provided or undecodable audio", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Model missing or transcription failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn speech_to_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SttResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let model = state.registry.stt_model().await?;
    let transcription = model.transcribe(upload.audio).await?;

    Ok(Json(SttResponse::from(transcription)))
}
