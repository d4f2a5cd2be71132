use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::model::fields::{ExtractedFields, MandatoryField};

/// Processing queue a claim is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Route {
    Investigation,
    ManualReview,
    SpecialistQueue,
    FastTrack,
    Standard,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Investigation => "Investigation",
            Route::ManualReview => "ManualReview",
            Route::SpecialistQueue => "SpecialistQueue",
            Route::FastTrack => "FastTrack",
            Route::Standard => "Standard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route plus a generated explanation of why it was chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteDecision {
    pub route: Route,
    pub reasoning: String,
}

/// Full triage result for one FNOL document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAssessment {
    pub extracted_fields: ExtractedFields,
    /// Mandatory fields that are absent or blank, as dotted paths
    #[schema(value_type = Vec<String>)]
    pub missing_fields: Vec<MandatoryField>,
    pub recommended_route: Route,
    pub reasoning: String,
}
