//! Claim intake pipeline: extraction, completeness check, routing

use crate::model::ClaimAssessment;
use crate::service::extraction::{ExtractionCoordinator, ExtractionFailure, model};
use crate::service::routing::{determine_route, identify_missing_fields};

/// Turns raw FNOL text into a routed claim assessment
pub struct ClaimIntakeService {
    coordinator: ExtractionCoordinator,
}

impl ClaimIntakeService {
    pub fn new(coordinator: ExtractionCoordinator) -> Self {
        Self { coordinator }
    }

    /// `model` when the structured-model strategy can run, `pattern_only` otherwise
    pub fn extraction_mode(&self) -> &'static str {
        if self
            .coordinator
            .available_strategies()
            .contains(&model::STRATEGY_NAME)
        {
            "model"
        } else {
            "pattern_only"
        }
    }

    /// Extract fields from document text and route the claim
    ///
    /// Empty or unrecognizable text is not an error: it yields an assessment
    /// with every mandatory field missing.
    pub async fn process_claim(&self, text: &str) -> Result<ClaimAssessment, ExtractionFailure> {
        let extracted_fields = self.coordinator.extract(text).await?;
        let missing_fields = identify_missing_fields(&extracted_fields);
        let decision = determine_route(&extracted_fields, &missing_fields);

        tracing::info!(
            route = %decision.route,
            missing_fields = missing_fields.len(),
            text_length = text.len(),
            "Claim processed"
        );

        Ok(ClaimAssessment {
            extracted_fields,
            missing_fields,
            recommended_route: decision.route,
            reasoning: decision.reasoning,
        })
    }
}
