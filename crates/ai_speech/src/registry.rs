//! Model registry
//!
//! Owns the process-wide TTS and STT engine handles. Each engine is built on
//! first use (or eagerly by [`ModelRegistry::warm_up`]) and cached for the
//! lifetime of the registry. Construction runs behind a [`OnceCell`], so
//! concurrent first callers wait for a single build. A failed build is not
//! cached and the next caller tries again.

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use crate::config::{SpeechConfig, TtsEngineKind};
use crate::converter::AudioConverter;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::providers::{PiperProvider, ToneSynthesizer, WhisperCppProvider};

/// Builds the TTS engine
pub type TtsFactory =
    Arc<dyn Fn() -> Result<Arc<dyn TextToSpeech>, SpeechError> + Send + Sync>;

/// Builds the STT engine
pub type SttFactory =
    Arc<dyn Fn() -> Result<Arc<dyn SpeechToText>, SpeechError> + Send + Sync>;

/// Lazily constructed, cached speech engines
pub struct ModelRegistry {
    tts_factory: TtsFactory,
    stt_factory: SttFactory,
    tts: OnceCell<Arc<dyn TextToSpeech>>,
    stt: OnceCell<Arc<dyn SpeechToText>>,
}

impl ModelRegistry {
    /// Create a registry from custom factories
    #[must_use]
    pub fn with_factories(tts_factory: TtsFactory, stt_factory: SttFactory) -> Self {
        Self {
            tts_factory,
            stt_factory,
            tts: OnceCell::new(),
            stt: OnceCell::new(),
        }
    }

    /// Create a registry whose engines follow the configuration
    ///
    /// `speech.tts.engine` picks the TTS engine. STT is always whisper.cpp.
    #[must_use]
    pub fn from_config(config: &SpeechConfig) -> Self {
        let tts_config = config.tts.clone();
        let tts_factory: TtsFactory = match tts_config.engine {
            TtsEngineKind::Tone => Arc::new(|| -> Result<Arc<dyn TextToSpeech>, SpeechError> {
                Ok(Arc::new(ToneSynthesizer::new()))
            }),
            TtsEngineKind::Piper => {
                Arc::new(move || -> Result<Arc<dyn TextToSpeech>, SpeechError> {
                    Ok(Arc::new(PiperProvider::new(tts_config.clone())?))
                })
            },
        };

        let stt_config = config.stt.clone();
        let ffmpeg_path = config.ffmpeg_path.clone();
        let stt_factory: SttFactory =
            Arc::new(move || -> Result<Arc<dyn SpeechToText>, SpeechError> {
                let converter = AudioConverter::with_ffmpeg_path(ffmpeg_path.clone());
                Ok(Arc::new(WhisperCppProvider::new(stt_config.clone(), converter)?))
            });

        Self::with_factories(tts_factory, stt_factory)
    }

    /// Get the TTS engine, building it on first call
    ///
    /// # Errors
    ///
    /// Returns the factory's error, typically `SpeechError::ModelNotFound`.
    pub async fn tts_engine(&self) -> Result<Arc<dyn TextToSpeech>, SpeechError> {
        self.tts
            .get_or_try_init(|| async {
                let engine = (self.tts_factory)()?;
                info!(
                    engine = engine.engine_name(),
                    placeholder = engine.is_placeholder(),
                    "TTS engine loaded"
                );
                Ok(engine)
            })
            .await
            .cloned()
    }

    /// Get the STT model, building it on first call
    ///
    /// # Errors
    ///
    /// Returns the factory's error, typically `SpeechError::ModelNotFound`.
    pub async fn stt_model(&self) -> Result<Arc<dyn SpeechToText>, SpeechError> {
        self.stt
            .get_or_try_init(|| async {
                let model = (self.stt_factory)()?;
                info!(model = model.model_name(), "STT model loaded");
                Ok(model)
            })
            .await
            .cloned()
    }

    /// Build both engines now
    ///
    /// Failures are logged, not returned. Requests retry construction.
    #[instrument(skip(self))]
    pub async fn warm_up(&self) {
        if let Err(e) = self.tts_engine().await {
            warn!(error = %e, "TTS engine unavailable at startup");
        }
        if let Err(e) = self.stt_model().await {
            warn!(error = %e, "STT model unavailable at startup");
        }
    }

    /// Whether a real (non-placeholder) TTS engine has been built
    #[must_use]
    pub fn tts_loaded(&self) -> bool {
        self.tts.get().is_some_and(|engine| !engine.is_placeholder())
    }

    /// Whether the STT model has been built
    #[must_use]
    pub fn stt_loaded(&self) -> bool {
        self.stt.get().is_some()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("tts", &self.tts.get().map(|e| e.engine_name().to_string()))
            .field("stt", &self.stt.get().map(|m| m.model_name().to_string()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use domain::{SynthesisRequest, Transcription};

    use super::*;
    use crate::types::{AudioData, AudioFormat};

    struct RealTts;

    #[async_trait]
    impl TextToSpeech for RealTts {
        async fn synthesize(&self, _request: &SynthesisRequest) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(vec![1, 2, 3], AudioFormat::Wav))
        }

        fn engine_name(&self) -> &str {
            "real"
        }
    }

    struct FixedStt;

    #[async_trait]
    impl SpeechToText for FixedStt {
        async fn transcribe(&self, _audio: AudioData) -> Result<Transcription, SpeechError> {
            Ok(Transcription::new("fixed"))
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn failing_stt() -> SttFactory {
        Arc::new(|| -> Result<Arc<dyn SpeechToText>, SpeechError> {
            Err(SpeechError::model_not_found("/missing"))
        })
    }

    fn counting_tts(counter: Arc<AtomicUsize>) -> TtsFactory {
        Arc::new(move || -> Result<Arc<dyn TextToSpeech>, SpeechError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(RealTts))
        })
    }

    #[tokio::test]
    async fn engine_is_built_once_and_cached() {
        let builds = Arc::new(AtomicUsize::new(0));
        let registry = ModelRegistry::with_factories(counting_tts(builds.clone()), failing_stt());

        let first = registry.tts_engine().await.unwrap();
        let second = registry.tts_engine().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_calls_build_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(ModelRegistry::with_factories(
            counting_tts(builds.clone()),
            failing_stt(),
        ));

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..16 {
            let registry = registry.clone();
            tasks.spawn(async move { registry.tts_engine().await.is_ok() });
        }
        while let Some(ok) = tasks.join_next().await {
            assert!(ok.unwrap());
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let stt: SttFactory = Arc::new(move || -> Result<Arc<dyn SpeechToText>, SpeechError> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SpeechError::model_not_found("/models/whisper-small"))
            } else {
                Ok(Arc::new(FixedStt))
            }
        });
        let registry =
            ModelRegistry::with_factories(counting_tts(Arc::new(AtomicUsize::new(0))), stt);

        let Err(err) = registry.stt_model().await else {
            panic!("expected stt_model to fail");
        };
        assert!(matches!(err, SpeechError::ModelNotFound { .. }));
        assert!(!registry.stt_loaded());

        assert!(registry.stt_model().await.is_ok());
        assert!(registry.stt_loaded());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn placeholder_engine_is_not_reported_loaded() {
        let registry = ModelRegistry::from_config(&SpeechConfig::default());
        assert!(!registry.tts_loaded());

        let engine = registry.tts_engine().await.unwrap();
        assert_eq!(engine.engine_name(), "tone");
        assert!(!registry.tts_loaded());
    }

    #[tokio::test]
    async fn real_engine_is_reported_loaded() {
        let registry = ModelRegistry::with_factories(
            counting_tts(Arc::new(AtomicUsize::new(0))),
            failing_stt(),
        );
        assert!(!registry.tts_loaded());

        registry.tts_engine().await.unwrap();
        assert!(registry.tts_loaded());
    }

    #[tokio::test]
    async fn warm_up_tolerates_failures() {
        let registry = ModelRegistry::with_factories(
            counting_tts(Arc::new(AtomicUsize::new(0))),
            failing_stt(),
        );

        registry.warm_up().await;

        assert!(registry.tts_loaded());
        assert!(!registry.stt_loaded());
    }

    #[tokio::test]
    async fn from_config_reports_missing_whisper_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SpeechConfig::default();
        config.stt.model_dir = dir.path().join("absent");

        let registry = ModelRegistry::from_config(&config);
        let Err(err) = registry.stt_model().await else {
            panic!("expected stt_model to fail");
        };

        assert!(matches!(err, SpeechError::ModelNotFound { path } if path == dir.path().join("absent")));
    }

    #[tokio::test]
    async fn from_config_reports_missing_piper_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SpeechConfig::default();
        config.tts.engine = TtsEngineKind::Piper;
        config.tts.model_dir = dir.path().join("voices");

        let registry = ModelRegistry::from_config(&config);
        let result = registry.tts_engine().await;

        assert!(matches!(result, Err(SpeechError::ModelNotFound { .. })));
        assert!(!registry.tts_loaded());
    }

    #[test]
    fn debug_shows_engine_state() {
        let registry = ModelRegistry::from_config(&SpeechConfig::default());
        let debug = format!("{registry:?}");
        assert!(debug.contains("ModelRegistry"));
        assert!(debug.contains("tts: None"));
    }
}
