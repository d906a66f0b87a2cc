//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use ai_speech::{
    AudioData, AudioFormat, ModelRegistry, SpeechError, SpeechToText, SttFactory, TextToSpeech,
    TtsFactory, ToneSynthesizer, wav,
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use domain::{PcmBuffer, SynthesisRequest, Transcription};
use infrastructure::AppConfig;
use presentation_http::{AppState, ErrorResponse, create_router};
use serde_json::{Value, json};

/// TTS engine that stands in for a real model
struct MockVoice;

#[async_trait]
impl TextToSpeech for MockVoice {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SpeechError> {
        let samples = vec![0i16; request.text().len() * 10];
        let pcm = PcmBuffer::mono(samples, 22_050)?;
        Ok(AudioData::new(wav::encode(&pcm)?, AudioFormat::Wav))
    }

    fn engine_name(&self) -> &str {
        "mock-voice"
    }
}

/// STT engine that returns a fixed transcript
struct MockWhisper;

#[async_trait]
impl SpeechToText for MockWhisper {
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("audio is empty".to_string()));
        }
        Ok(Transcription::new("hello world").with_duration(1.5))
    }

    fn model_name(&self) -> &str {
        "mock-whisper"
    }
}

fn tone_factory() -> TtsFactory {
    Arc::new(|| -> Result<Arc<dyn TextToSpeech>, SpeechError> {
        Ok(Arc::new(ToneSynthesizer::new()))
    })
}

fn voice_factory() -> TtsFactory {
    Arc::new(|| -> Result<Arc<dyn TextToSpeech>, SpeechError> { Ok(Arc::new(MockVoice)) })
}

fn whisper_factory() -> SttFactory {
    Arc::new(|| -> Result<Arc<dyn SpeechToText>, SpeechError> { Ok(Arc::new(MockWhisper)) })
}

fn server_with(registry: ModelRegistry, config: AppConfig) -> TestServer {
    let router = create_router(AppState::new(registry, config));
    TestServer::new(router).expect("Failed to create test server")
}

fn mock_server() -> TestServer {
    server_with(
        ModelRegistry::with_factories(tone_factory(), whisper_factory()),
        AppConfig::default(),
    )
}

fn missing_models_server(dir: &tempfile::TempDir) -> TestServer {
    let mut config = AppConfig::default();
    config.speech.stt.model_dir = dir.path().join("whisper-small");
    server_with(ModelRegistry::from_config(&config.speech), config)
}

fn wav_upload() -> Part {
    let pcm = PcmBuffer::mono(vec![0; 16_000], 16_000).unwrap();
    Part::bytes(wav::encode(&pcm).unwrap())
        .file_name("clip.wav")
        .mime_type("audio/wav")
}

// Health

#[tokio::test]
async fn healthz_reports_nothing_loaded_at_start() {
    let server = mock_server();

    let response = server.get("/healthz").await;

    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok", "tts": false, "stt": false}));
}

#[tokio::test]
async fn healthz_ignores_placeholder_engine() {
    let server = mock_server();

    server
        .post("/api/tts")
        .json(&json!({"text": "Hello"}))
        .await
        .assert_status_ok();

    let body: Value = server.get("/healthz").await.json();
    assert_eq!(body["tts"], false);
}

#[tokio::test]
async fn healthz_reports_real_engines_once_built() {
    let server = server_with(
        ModelRegistry::with_factories(voice_factory(), whisper_factory()),
        AppConfig::default(),
    );

    server
        .post("/api/tts")
        .json(&json!({"text": "Hello"}))
        .await
        .assert_status_ok();
    server
        .post("/api/stt")
        .multipart(MultipartForm::new().add_part("file", wav_upload()))
        .await
        .assert_status_ok();

    let body: Value = server.get("/healthz").await.json();
    assert_eq!(body, json!({"status": "ok", "tts": true, "stt": true}));
}

// TTS

#[tokio::test]
async fn tts_returns_fallback_tone_as_wav() {
    let server = mock_server();

    let response = server
        .post("/api/tts")
        .json(&json!({"text": "Hello world"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/wav");

    let bytes = response.as_bytes();
    assert_eq!(&bytes[..4], b"RIFF");
    let info = wav::probe(bytes).unwrap();
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 16_000);
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.frames, 9_600);
}

#[tokio::test]
async fn repeated_tone_requests_are_byte_identical() {
    let server = mock_server();
    let request = json!({"text": "Deterministic output", "speed": 1.25});

    let first = server.post("/api/tts").json(&request).await;
    let second = server.post("/api/tts").json(&request).await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[tokio::test]
async fn tts_speed_shortens_tone() {
    let server = mock_server();

    let normal = server
        .post("/api/tts")
        .json(&json!({"text": "Hello world"}))
        .await;
    let fast = server
        .post("/api/tts")
        .json(&json!({"text": "Hello world", "speed": 2.0}))
        .await;

    assert_eq!(wav::probe(normal.as_bytes()).unwrap().frames, 9_600);
    assert_eq!(wav::probe(fast.as_bytes()).unwrap().frames, 4_800);
}

#[tokio::test]
async fn tts_rejects_empty_text() {
    let server = mock_server();

    let response = server.post("/api/tts").json(&json!({"text": ""})).await;

    response.assert_status_bad_request();
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "validation_error");
}

#[tokio::test]
async fn tts_rejects_whitespace_text() {
    let server = mock_server();

    let response = server.post("/api/tts").json(&json!({"text": "   "})).await;

    response.assert_status_bad_request();
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "bad_request");
}

#[tokio::test]
async fn tts_rejects_non_positive_speed() {
    let server = mock_server();

    for speed in [0.0, -1.0] {
        let response = server
            .post("/api/tts")
            .json(&json!({"text": "Hello", "speed": speed}))
            .await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn tts_rejects_invalid_json() {
    let server = mock_server();

    let response = server
        .post("/api/tts")
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "validation_error");
}

#[tokio::test]
async fn tts_uses_real_engine_when_configured() {
    let server = server_with(
        ModelRegistry::with_factories(voice_factory(), whisper_factory()),
        AppConfig::default(),
    );

    let response = server.post("/api/tts").json(&json!({"text": "Hi"})).await;

    response.assert_status_ok();
    let info = wav::probe(response.as_bytes()).unwrap();
    assert_eq!(info.sample_rate, 22_050);
    assert_eq!(info.frames, 20);
}

// OpenAI speech

#[tokio::test]
async fn openai_speech_matches_native_tts() {
    let server = mock_server();

    let native = server
        .post("/api/tts")
        .json(&json!({"text": "Same clip", "speed": 0.5}))
        .await;
    let openai = server
        .post("/v1/audio/speech")
        .json(&json!({"model": "tts-1", "input": "Same clip", "speed": 0.5, "response_format": "WAV"}))
        .await;

    openai.assert_status_ok();
    assert_eq!(openai.header("content-type"), "audio/wav");
    assert_eq!(native.as_bytes(), openai.as_bytes());
}

#[tokio::test]
async fn openai_speech_defaults_to_wav() {
    let server = mock_server();

    for body in [
        json!({"model": "tts-1", "input": "Hello"}),
        json!({"model": "tts-1", "input": "Hello", "response_format": ""}),
        json!({"model": "tts-1", "input": "Hello", "response_format": null}),
    ] {
        let response = server.post("/v1/audio/speech").json(&body).await;
        response.assert_status_ok();
        assert_eq!(&response.as_bytes()[..4], b"RIFF");
    }
}

#[tokio::test]
async fn openai_speech_rejects_mp3() {
    let server = mock_server();

    let response = server
        .post("/v1/audio/speech")
        .json(&json!({"model": "tts-1", "input": "Hello", "response_format": "mp3"}))
        .await;

    response.assert_status_bad_request();
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "bad_request");
    assert!(body.error.contains("mp3"));
}

#[tokio::test]
async fn openai_speech_requires_model_and_input() {
    let server = mock_server();

    server
        .post("/v1/audio/speech")
        .json(&json!({"input": "Hello"}))
        .await
        .assert_status_bad_request();
    server
        .post("/v1/audio/speech")
        .json(&json!({"model": "tts-1", "input": ""}))
        .await
        .assert_status_bad_request();
}

// STT

#[tokio::test]
async fn stt_returns_text_and_duration() {
    let server = mock_server();

    let response = server
        .post("/api/stt")
        .multipart(MultipartForm::new().add_part("file", wav_upload()))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"text": "hello world", "duration": 1.5}));
}

#[tokio::test]
async fn stt_without_file_is_bad_request() {
    let server = mock_server();

    let response = server
        .post("/api/stt")
        .multipart(MultipartForm::new().add_text("model", "whisper-1"))
        .await;

    response.assert_status_bad_request();
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "No file provided");
}

#[tokio::test]
async fn stt_without_filename_is_bad_request() {
    let server = mock_server();

    let response = server
        .post("/api/stt")
        .multipart(MultipartForm::new().add_part("file", Part::bytes(vec![1, 2, 3])))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn stt_without_multipart_body_is_bad_request() {
    let server = mock_server();

    let response = server.post("/api/stt").await;
    response.assert_status_bad_request();

    let response = server.post("/api/stt").json(&json!({"file": "x"})).await;
    response.assert_status_bad_request();
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "bad_request");
}

#[tokio::test]
async fn stt_missing_model_is_server_error_with_details() {
    let dir = tempfile::tempdir().unwrap();
    let server = missing_models_server(&dir);

    let response = server
        .post("/api/stt")
        .multipart(MultipartForm::new().add_part("file", wav_upload()))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "internal_error");
    let details = body.details.expect("details exposed by default");
    assert!(details.starts_with("Model not found at"), "{details}");
    assert!(details.contains("whisper-small"));

    let health: Value = server.get("/healthz").await.json();
    assert_eq!(health["stt"], false);
}

#[tokio::test]
async fn stt_rejects_oversized_upload() {
    let mut config = AppConfig::default();
    config.server.max_body_size_audio_bytes = 1024;
    let server = server_with(
        ModelRegistry::with_factories(tone_factory(), whisper_factory()),
        config,
    );

    let response = server
        .post("/api/stt")
        .multipart(
            MultipartForm::new()
                .add_part("file", Part::bytes(vec![0u8; 8192]).file_name("big.wav")),
        )
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

// OpenAI transcriptions

#[tokio::test]
async fn transcriptions_default_model_name() {
    let server = mock_server();

    let response = server
        .post("/v1/audio/transcriptions")
        .multipart(MultipartForm::new().add_part("file", wav_upload()))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"text": "hello world", "model": "whisper-small"}));
}

#[tokio::test]
async fn transcriptions_echo_requested_model() {
    let server = mock_server();

    let response = server
        .post("/v1/audio/transcriptions")
        .multipart(
            MultipartForm::new()
                .add_text("model", "whisper-1")
                .add_part("file", wav_upload()),
        )
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"text": "hello world", "model": "whisper-1"}));
}

#[tokio::test]
async fn transcriptions_without_file_is_bad_request() {
    let server = mock_server();

    server
        .post("/v1/audio/transcriptions")
        .multipart(MultipartForm::new().add_text("model", "whisper-1"))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn transcriptions_missing_model_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let server = missing_models_server(&dir);

    let response = server
        .post("/v1/audio/transcriptions")
        .multipart(MultipartForm::new().add_part("file", wav_upload()))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

// Cross-cutting

#[tokio::test]
async fn responses_carry_request_id() {
    let server = mock_server();

    let response = server.get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());

    let sent = "0192a7b8-1c2d-7e3f-8a9b-0c1d2e3f4a5b";
    let response = server
        .post("/v1/audio/speech")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(sent),
        )
        .json(&json!({"model": "tts-1", "input": "Hello", "response_format": "mp3"}))
        .await;
    assert_eq!(response.header("x-request-id"), sent);
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let server = mock_server();

    let response = server.get("/api/unknown").await;

    response.assert_status_not_found();
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "not_found");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = mock_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/v1/audio/speech"].is_object());
    assert!(doc["paths"]["/healthz"].is_object());
}
