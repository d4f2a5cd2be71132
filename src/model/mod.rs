pub mod config;
pub mod fields;
pub mod routing;

pub use config::{Config, ExtractionConfig};
pub use fields::{
    AssetDetails, ExtractedFields, FieldValue, IncidentInformation, InvolvedParties,
    MandatoryField, PolicyInformation,
};
pub use routing::{ClaimAssessment, Route, RouteDecision};
