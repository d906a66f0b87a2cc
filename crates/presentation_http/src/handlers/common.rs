//! Shared helpers for the upload handlers
//!
//! Both transcription endpoints take the same multipart form: a `file`
//! part with the audio and, for the OpenAI route, an optional `model` text
//! part.

use ai_speech::AudioData;
use axum::extract::{
    Multipart,
    multipart::{MultipartError, MultipartRejection},
};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::error::ApiError;

/// Form field carrying the audio
pub const FILE_FIELD: &str = "file";

/// Form field carrying the requested model name
pub const MODEL_FIELD: &str = "model";

/// A parsed audio upload
#[derive(Debug)]
pub struct AudioUpload {
    /// Uploaded audio, format sniffed from its bytes
    pub audio: AudioData,
    /// Client-side file name
    pub filename: String,
    /// `model` form field, if sent and not blank
    pub model: Option<String>,
}

/// Wrap synthesized audio in a response with its MIME type
pub fn audio_response(audio: AudioData) -> Response {
    let mime = audio.mime_type();
    ([(header::CONTENT_TYPE, mime)], audio.into_data()).into_response()
}

fn multipart_error(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(format!("Invalid multipart data: {}", err.body_text()))
    }
}

/// Read the audio upload out of a multipart body
///
/// # Errors
///
/// Returns `ApiError::BadRequest` when the body is not multipart, is
/// malformed, or has no `file` part with a file name, and
/// `ApiError::PayloadTooLarge` when the body exceeds the route's limit.
pub async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AudioUpload, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!(error = %e, "Rejected non-multipart upload");
        ApiError::BadRequest("No file provided".to_string())
    })?;

    let mut file = None;
    let mut model = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| multipart_error(&e))?;
                file = Some((filename, content_type, data.to_vec()));
            },
            MODEL_FIELD => {
                let value = field.text().await.map_err(|e| multipart_error(&e))?;
                model = Some(value.trim().to_string()).filter(|m| !m.is_empty());
            },
            _ => {},
        }
    }

    let Some((filename, content_type, data)) = file.filter(|(name, _, _)| !name.is_empty())
    else {
        return Err(ApiError::BadRequest("No file provided".to_string()));
    };

    debug!(%filename, size = data.len(), "Received audio upload");

    Ok(AudioUpload {
        audio: AudioData::from_upload(data, content_type.as_deref()),
        filename,
        model,
    })
}
