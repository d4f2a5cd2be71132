//! REST API endpoints for FNOL claim processing

use actix_web::{HttpRequest, HttpResponse, http::header, post, web};
use futures::StreamExt;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::error::{ApiError, ErrorResponse};
use crate::api::health;
use crate::model::{
    AssetDetails, ClaimAssessment, ExtractedFields, IncidentInformation, InvolvedParties,
    PolicyInformation, Route,
};
use crate::service::ClaimIntakeService;
use crate::service::document::{self, DocumentKind};

/// Upper bound for uploaded documents
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        process_claim,
        process_claim_text,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ClaimAssessment,
        ExtractedFields,
        PolicyInformation,
        IncidentInformation,
        InvolvedParties,
        AssetDetails,
        Route,
        ProcessClaimTextRequest,
        ErrorResponse,
        health::HealthStatus,
        health::ReadinessStatus,
    )),
    tags(
        (name = "claims", description = "FNOL extraction and routing"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Query parameters for document upload
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadParams {
    /// Original file name; its extension (`pdf` or `txt`) selects the decoder
    pub filename: Option<String>,
}

/// Claim text submitted directly as JSON
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessClaimTextRequest {
    /// Raw FNOL document text
    pub text: String,
}

/// Process an uploaded FNOL document (PDF or plain text)
///
/// The body is the raw file bytes, not a `multipart/form-data` form. The
/// document kind comes from the `filename` extension when given, otherwise
/// from the `Content-Type` header (`application/pdf` or `text/plain`).
#[utoipa::path(
    post,
    path = "/process-claim",
    params(UploadParams),
    request_body(
        content = Vec<u8>,
        description = "Raw PDF or TXT file bytes; multipart/form-data is rejected",
        content_type = "application/octet-stream"
    ),
    responses(
        (status = 200, description = "Claim extracted and routed", body = ClaimAssessment),
        (status = 400, description = "Missing, unsupported, multipart, empty or corrupted document", body = ErrorResponse),
        (status = 413, description = "Document larger than 10 MiB", body = ErrorResponse),
        (status = 503, description = "Field extraction unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "claims"
)]
#[post("/process-claim")]
pub async fn process_claim(
    service: web::Data<ClaimIntakeService>,
    req: HttpRequest,
    query: web::Query<UploadParams>,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let kind = resolve_kind(&req, query.filename.as_deref())?;
    let body = read_body(payload, MAX_UPLOAD_BYTES).await?;

    if body.is_empty() {
        return Err(ApiError::BadRequest(
            "No document provided. Please upload a PDF or TXT file.".to_string(),
        ));
    }

    tracing::info!(kind = ?kind, bytes = body.len(), "Processing uploaded claim document");

    // PDF text extraction is CPU-bound
    let text = web::block(move || document::decode(&body, kind))
        .await
        .map_err(|e| ApiError::Internal(format!("Document decoding task failed: {e}")))??;

    let assessment = service.process_claim(&text).await?;
    Ok(HttpResponse::Ok().json(assessment))
}

/// Process FNOL claim text submitted as JSON
#[utoipa::path(
    post,
    path = "/process-claim-text",
    request_body = ProcessClaimTextRequest,
    responses(
        (status = 200, description = "Claim extracted and routed", body = ClaimAssessment),
        (status = 400, description = "Blank text or malformed JSON", body = ErrorResponse),
        (status = 503, description = "Field extraction unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "claims"
)]
#[post("/process-claim-text")]
pub async fn process_claim_text(
    service: web::Data<ClaimIntakeService>,
    request: web::Json<ProcessClaimTextRequest>,
) -> Result<HttpResponse, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Provided text is empty. Please provide valid FNOL document text.".to_string(),
        ));
    }

    tracing::info!(text_length = request.text.len(), "Processing claim text");

    let assessment = service.process_claim(&request.text).await?;
    Ok(HttpResponse::Ok().json(assessment))
}

/// Document kind from the file name, falling back to the Content-Type header
fn resolve_kind(req: &HttpRequest, filename: Option<&str>) -> Result<DocumentKind, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let is_multipart = content_type
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/"));
    if is_multipart {
        return Err(ApiError::BadRequest(
            "Multipart uploads are not supported. Send the file bytes as the request body \
             with a filename query parameter or a Content-Type of application/pdf or text/plain."
                .to_string(),
        ));
    }

    if let Some(filename) = filename.filter(|f| !f.trim().is_empty()) {
        return Ok(DocumentKind::from_filename(filename)?);
    }

    let content_type = content_type.ok_or_else(|| {
        ApiError::BadRequest(
            "Provide a filename query parameter or a Content-Type header".to_string(),
        )
    })?;

    Ok(DocumentKind::from_mime(content_type)?)
}

/// Collect the request body, rejecting it as soon as it crosses `limit`
async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut, ApiError> {
    let mut body = web::BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
        if body.len() + chunk.len() > limit {
            return Err(ApiError::PayloadTooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Configure claim routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    cfg.app_data(json_config)
        .service(process_claim)
        .service(process_claim_text);
}
