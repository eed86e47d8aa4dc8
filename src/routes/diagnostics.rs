use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use std::time::Duration;
use tracing::warn;

use crate::backend::BackendApi;

const DIAGNOSTIC_TIMEOUT: Duration = Duration::from_secs(10);

/// # Backend Health Status
///
/// Fetches the backend's own health report so the UI can show both sides of
/// the deployment. Backend status codes are relayed unchanged.
#[utoipa::path(
    get,
    path = "/diagnostics/api/health",
    responses(
        (status = 200, description = "Backend health report"),
        (status = 500, description = "Backend unreachable")
    ),
    tag = "Diagnostics"
)]
#[get("/api/health")]
pub async fn backend_health(api: web::Data<dyn BackendApi>) -> impl Responder {
    match api
        .get_json("api/v1/health".to_string(), DIAGNOSTIC_TIMEOUT)
        .await
    {
        Ok(resp) => super::relay(resp),
        Err(e) => {
            warn!("backend health fetch failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Network error: {}", e)
            }))
        }
    }
}

/// # Backend Diagnostic Report
///
/// Fetches the backend's diagnostic information, relaying status codes
/// unchanged.
#[utoipa::path(
    get,
    path = "/diagnostics/api/diagnostic",
    responses(
        (status = 200, description = "Backend diagnostic report"),
        (status = 500, description = "Backend unreachable")
    ),
    tag = "Diagnostics"
)]
#[get("/api/diagnostic")]
pub async fn backend_diagnostic(api: web::Data<dyn BackendApi>) -> impl Responder {
    match api
        .get_json("api/v1/diagnostic".to_string(), DIAGNOSTIC_TIMEOUT)
        .await
    {
        Ok(resp) => super::relay(resp),
        Err(e) => {
            warn!("backend diagnostic fetch failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Network error: {}", e)
            }))
        }
    }
}

/// Registers the diagnostics endpoints, mounted under the `/diagnostics`
/// scope.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(backend_health).service(backend_diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendResponse, MockBackendApi};
    use actix_web::{App, test};
    use serde_json::Value;
    use std::sync::Arc;

    async fn fetch(mock: MockBackendApi, uri: &str) -> (u16, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(Arc::new(mock) as Arc<dyn BackendApi>))
                .service(web::scope("/diagnostics").configure(configure_routes)),
        )
        .await;

        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;
        let payload = serde_json::from_slice(&body).unwrap_or(Value::Null);

        (status, payload)
    }

    #[actix_web::test]
    async fn test_backend_health_passthrough() {
        let mut mock = MockBackendApi::new();
        mock.expect_get_json()
            .withf(|path, timeout| path == "api/v1/health" && *timeout == DIAGNOSTIC_TIMEOUT)
            .returning(|_, _| {
                Ok(BackendResponse {
                    status: 200,
                    body: json!({ "status": "healthy" }),
                })
            });

        let (status, payload) = fetch(mock, "/diagnostics/api/health").await;

        assert_eq!(status, 200);
        assert_eq!(payload["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_backend_health_propagates_status() {
        let mut mock = MockBackendApi::new();
        mock.expect_get_json().returning(|_, _| {
            Ok(BackendResponse {
                status: 404,
                body: Value::Null,
            })
        });

        let (status, payload) = fetch(mock, "/diagnostics/api/health").await;

        assert_eq!(status, 404);
        assert_eq!(payload["error"], "API request failed with status 404");
    }

    #[actix_web::test]
    async fn test_backend_diagnostic_network_error() {
        let mut mock = MockBackendApi::new();
        mock.expect_get_json()
            .withf(|path, _| path == "api/v1/diagnostic")
            .returning(|_, _| Err("timed out".to_string()));

        let (status, payload) = fetch(mock, "/diagnostics/api/diagnostic").await;

        assert_eq!(status, 500);
        assert_eq!(payload["error"], "Network error: timed out");
    }
}
