//! Health check endpoints for Kubernetes liveness and readiness probes

use actix_web::{HttpResponse, Responder, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::ClaimIntakeService;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    /// `model` when structured-model extraction is configured, `pattern_only` otherwise
    pub extraction: String,
}

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe endpoint
///
/// Pattern extraction has no external dependency, so the service is always
/// ready; the body reports which extraction mode is active.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus)
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn readiness(service: web::Data<ClaimIntakeService>) -> impl Responder {
    HttpResponse::Ok().json(ReadinessStatus {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        extraction: service.extraction_mode().to_string(),
    })
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    use crate::model::ExtractionConfig;
    use crate::service::{ExtractionCoordinator, ModelExtractor};

    #[actix_web::test]
    async fn test_liveness() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/health/live").to_request();
        let status: HealthStatus = test::call_and_read_body_json(&app, req).await;

        assert_eq!(status.status, "ok");
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn test_readiness_reports_pattern_only_without_credential() {
        let model = ModelExtractor::new(None, ExtractionConfig::default());
        let service = web::Data::new(ClaimIntakeService::new(
            ExtractionCoordinator::with_fallback(model),
        ));
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let status: ReadinessStatus = test::call_and_read_body_json(&app, req).await;

        assert_eq!(status.status, "ready");
        assert_eq!(status.extraction, "pattern_only");
    }
}
