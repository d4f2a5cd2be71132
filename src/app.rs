//! Application state and service initialization
//!
//! Centralizes service construction so `main` only wires the HTTP server.

use crate::model::Config;
use crate::service::{ClaimIntakeService, ExtractionCoordinator, LlmClient, ModelExtractor};

/// Application state containing all services
pub struct AppState {
    /// Extraction plus routing pipeline
    pub intake_service: ClaimIntakeService,
}

impl AppState {
    /// Build the service graph
    ///
    /// A missing `OPENAI_API_KEY` is not an error: the structured-model
    /// strategy stays in the chain but is skipped as unavailable, leaving
    /// pattern extraction. A key the provider client rejects is fatal.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let llm_client = config
            .openai_api_key
            .as_deref()
            .map(LlmClient::new)
            .transpose()
            .map_err(AppError::InvalidConfig)?;

        let model_extractor = ModelExtractor::new(llm_client, config.extraction);
        let coordinator = ExtractionCoordinator::with_fallback(model_extractor);

        tracing::info!(
            strategies = ?coordinator.strategy_names(),
            "Extraction chain configured"
        );

        Ok(Self {
            intake_service: ClaimIntakeService::new(coordinator),
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
