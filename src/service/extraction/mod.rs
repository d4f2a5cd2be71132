//! FNOL field extraction
//!
//! Extraction strategies share one contract (text in, [`ExtractedFields`]
//! out). The [`ExtractionCoordinator`] tries them in order and returns the
//! first result, so downstream code never knows which strategy produced it.

use async_trait::async_trait;

use crate::model::ExtractedFields;

pub mod error;
pub mod model;
pub mod patterns;
pub mod prompts;
pub mod validation;

pub use error::{ExternalExtractionFailure, ExtractionFailure};
pub use model::ModelExtractor;
pub use patterns::PatternExtractor;

/// Trait for text-to-fields extraction strategies
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether the strategy can succeed at all (e.g. its credential is configured)
    fn is_available(&self) -> bool {
        true
    }

    /// Extract the structured field set from raw document text
    async fn extract(&self, text: &str) -> Result<ExtractedFields, ExternalExtractionFailure>;
}

/// Ordered fallback chain over extraction strategies
pub struct ExtractionCoordinator {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ExtractionCoordinator {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Structured-model extraction first, pattern extraction as the floor
    pub fn with_fallback(model: ModelExtractor) -> Self {
        Self::new(vec![Box::new(model), Box::new(PatternExtractor::new())])
    }

    /// Names of the configured strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Names of the strategies that are able to run
    pub fn available_strategies(&self) -> Vec<&'static str> {
        self.strategies
            .iter()
            .filter(|s| s.is_available())
            .map(|s| s.name())
            .collect()
    }

    /// Run the strategies in order and return the first successful result
    ///
    /// Results are never merged: the winning strategy's output is returned as-is.
    pub async fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionFailure> {
        let mut failures = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            if !strategy.is_available() {
                tracing::debug!(
                    strategy = strategy.name(),
                    "Extraction strategy unavailable, skipping"
                );
                failures.push(format!("{}: unavailable", strategy.name()));
                continue;
            }

            match strategy.extract(text).await {
                Ok(fields) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        previous_failures = failures.len(),
                        "Field extraction succeeded"
                    );
                    return Ok(fields);
                }
                Err(e) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "Extraction strategy failed, falling back"
                    );
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        if failures.is_empty() {
            return Err(ExtractionFailure::AllStrategiesFailed(
                "no extraction strategy configured".to_string(),
            ));
        }

        tracing::error!(failures = ?failures, "All extraction strategies failed");
        Err(ExtractionFailure::AllStrategiesFailed(failures.join("; ")))
    }
}
