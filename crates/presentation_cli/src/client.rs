//! HTTP client for a running SpeechGate server

use std::path::Path;

use presentation_http::{
    ErrorResponse, adapters::OpenAiTranscriptionResponse, handlers::health::HealthResponse,
};
use reqwest::{StatusCode, multipart};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::cli::endpoint_url;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an error status
    #[error("Server returned {status}: {message}")]
    Api {
        /// HTTP status
        status: StatusCode,
        /// Server message, with details when the server exposes them
        message: String,
    },

    /// Reading the upload failed
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that could not be read
        path: String,
        /// Underlying error
        source: std::io::Error,
    },
}

/// Talks to the SpeechGate HTTP API
#[derive(Debug, Clone)]
pub struct SpeechGateClient {
    http: reqwest::Client,
    base_url: String,
}

impl SpeechGateClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    /// Turn a non-success response into `ClientError::Api`
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(ErrorResponse {
                error,
                details: Some(details),
                ..
            }) => format!("{error} ({details})"),
            Ok(ErrorResponse { error, .. }) => error,
            Err(_) => body,
        };
        Err(ClientError::Api { status, message })
    }

    /// `GET /healthz`
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url("/healthz")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /api/tts`, returning WAV bytes
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn speak(
        &self,
        text: &str,
        voice: Option<&str>,
        speed: Option<f64>,
    ) -> Result<Vec<u8>, ClientError> {
        let body = json!({ "text": text, "voice": voice, "speed": speed });
        let response = self
            .http
            .post(self.url("/api/tts"))
            .json(&body)
            .send()
            .await?;
        let bytes = Self::check(response).await?.bytes().await?;
        debug!(bytes = bytes.len(), "Received audio");
        Ok(bytes.to_vec())
    }

    /// `POST /v1/audio/transcriptions` with the file at `path`
    #[instrument(skip(self))]
    pub async fn transcribe(
        &self,
        path: &Path,
        model: Option<&str>,
    ) -> Result<OpenAiTranscriptionResponse, ClientError> {
        let data = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "audio.wav".to_string(), |n| n.to_string_lossy().into_owned());

        let mut form =
            multipart::Form::new().part("file", multipart::Part::bytes(data).file_name(file_name));
        if let Some(model) = model {
            form = form.text("model", model.to_string());
        }

        let response = self
            .http
            .post(self.url("/v1/audio/transcriptions"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
