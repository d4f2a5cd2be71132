//! Unified API error handling
//!
//! Every endpoint returns `Result<T, ApiError>` so failures share one body shape.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::document::DecodeError;
use crate::service::extraction::ExtractionFailure;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Malformed request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// File type other than PDF or TXT (400)
    #[error("Unsupported file format: {0}. Please upload PDF or TXT files only.")]
    UnsupportedFileType(String),

    /// Document decoded to nothing (400)
    #[error("Document contains no extractable text")]
    EmptyDocument,

    /// Document bytes could not be decoded (400)
    #[error("Unable to read document: {0}")]
    CorruptedFile(String),

    /// Upload over the size limit (413)
    #[error("Document exceeds the {0} byte upload limit")]
    PayloadTooLarge(usize),

    /// No extraction strategy produced a result (503)
    #[error("Field extraction unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::UnsupportedFileType(_) => "unsupported_file_type",
            ApiError::EmptyDocument => "empty_document",
            ApiError::CorruptedFile(_) => "corrupted_file",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::ServiceUnavailable(_) => "extraction_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::UnsupportedFileType(_)
            | ApiError::EmptyDocument
            | ApiError::CorruptedFile(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();
        let request_id = Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                request_id = %request_id,
                message = %self,
                "API error"
            );
        } else {
            tracing::warn!(
                error_type = error_type,
                status = status.as_u16(),
                request_id = %request_id,
                message = %self,
                "Rejected request"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id,
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::EmptyDocument => ApiError::EmptyDocument,
            DecodeError::CorruptedInput(msg) => ApiError::CorruptedFile(msg),
            DecodeError::UnsupportedKind(kind) => ApiError::UnsupportedFileType(kind),
        }
    }
}

impl From<ExtractionFailure> for ApiError {
    fn from(err: ExtractionFailure) -> Self {
        match err {
            ExtractionFailure::AllStrategiesFailed(msg) => ApiError::ServiceUnavailable(msg),
        }
    }
}
