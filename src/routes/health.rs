use crate::app_info::get_health_status;
use crate::models::health::HealthStatus;
use actix_web::{HttpResponse, Responder, get};

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp
/// and build metadata read from the project descriptor.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: JSON object with `status` ("healthy"), `timestamp` in ISO 8601
///     format, and the `service`, `version`, `rust_version` and `environment`
///     fields describing the running build
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2023-10-05T12:34:56.789012Z",
///   "service": "prompt-tuner",
///   "version": "0.2.0",
///   "rust_version": "1.84.0",
///   "environment": "development"
/// }
/// ```
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus)
    ),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(get_health_status())
}

/// Registers the health check endpoint with the Actix-web service
/// configuration.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(health);
}
