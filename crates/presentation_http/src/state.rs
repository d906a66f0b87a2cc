//! Application state shared across handlers

use std::sync::Arc;

use ai_speech::ModelRegistry;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Lazily built speech engines
    pub registry: Arc<ModelRegistry>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state whose engines follow the configuration
    pub fn from_config(config: AppConfig) -> Self {
        let registry = ModelRegistry::from_config(&config.speech);
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    /// Create state around an existing registry
    pub fn new(registry: ModelRegistry, config: AppConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}
