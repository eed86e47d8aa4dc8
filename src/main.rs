use actix_web::{App, HttpServer, middleware::Logger, web::Data};
use prompt_tuner::app_info;
use prompt_tuner::backend::{BackendApi, HttpBackendApi};
use prompt_tuner::openapi::ApiDoc;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Prompt Tuner Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - Server-rendered tuner pages and the JSON proxy endpoints
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
/// - A shared HTTP client for the workflow backend
///
/// # Endpoints
/// - Tuner pages: `/`, `/workflow-process`, `/manage-prompt`, `/evaluate`
/// - Health check: `/health`
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// - Server binds to `0.0.0.0:5173`
/// - `API_BASE_URL` selects the workflow backend
/// - `APP_ENV` and `APP_DEBUG` control the reported environment and log level
/// - Environment variables loaded from `.env` file (if present)
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let default_level = if app_info::debug_mode() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let http_api = HttpBackendApi::from_env();
    tracing::info!(
        "starting prompt-tuner ({} mode) against backend {}",
        app_info::environment(),
        http_api.base_url()
    );

    let backend = Data::from(Arc::new(http_api) as Arc<dyn BackendApi>);

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(backend.clone())
            .wrap(Logger::default())
            .configure(prompt_tuner::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind(("0.0.0.0", 5173))?
    .run()
    .await
}
