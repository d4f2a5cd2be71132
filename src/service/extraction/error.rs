//! Error types for field extraction

use std::time::Duration;

use thiserror::Error;

/// A single extraction strategy could not produce a result
///
/// Variants are kept apart for logging only; the coordinator handles all of
/// them the same way by moving on to the next strategy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExternalExtractionFailure {
    #[error("no credential configured for the extraction model")]
    MissingCredential,

    #[error("extraction model did not answer within {0:?}")]
    Timeout(Duration),

    #[error("extraction model request failed: {0}")]
    Request(String),

    #[error("extraction model returned unparsable output: {0}")]
    MalformedResponse(String),

    #[error("extraction model output violates the schema: {0}")]
    InvalidSchema(String),
}

/// Every configured extraction strategy failed
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionFailure {
    #[error("all extraction strategies failed: {0}")]
    AllStrategiesFailed(String),
}
