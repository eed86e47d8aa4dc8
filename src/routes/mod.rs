use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::web;
use serde_json::json;

use crate::backend::BackendResponse;

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp
/// and the build metadata read from the project descriptor.
pub mod health;

/// # Template Pages
///
/// The server-rendered pages of the tuner UI: the landing page, the workflow
/// walkthrough, the prompt editor and the evaluation form.
pub mod pages;

/// # Chat Proxy Endpoints
///
/// Forwards chat messages, feedback and sample requests to the backend
/// workflow API, relaying its responses and status codes.
pub mod chat;

/// # Prompt Management Endpoints
///
/// Lists, views, updates and seeds the prompt templates the
/// submission-over-criteria workflow requires.
pub mod prompts;

/// # Evaluation Endpoints
///
/// Runs submissions through the agent workflow and reshapes the transcript
/// into per-agent evaluations plus a summary verdict.
pub mod evaluation;

/// # Diagnostics Endpoints
///
/// Proxies the backend's health and diagnostic reports for the UI.
pub mod diagnostics;

/// Turns a backend reply into the response the browser sees: 200 bodies are
/// relayed unchanged, anything else keeps the backend's status code with an
/// `error` description.
pub(crate) fn relay(resp: BackendResponse) -> HttpResponse {
    if resp.status == 200 {
        return HttpResponse::Ok().json(resp.body);
    }

    let status =
        StatusCode::from_u16(resp.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(json!({
        "error": format!("API request failed with status {}", resp.status)
    }))
}

/// # Application Route Configuration
///
/// Mounts every route the tuner serves.
///
/// ## Mounted Services
/// - Template pages at the root (see [`pages::configure_routes`])
/// - Health check at `/health` (see [`health::configure_routes`])
/// - Chat proxy under `/chat` (see [`chat::configure_routes`])
/// - Prompt management under `/api/v1/prompts` (see [`prompts::configure_routes`])
/// - Evaluation endpoints under `/api` (see [`evaluation::configure_routes`])
/// - Diagnostics proxy under `/diagnostics` (see [`diagnostics::configure_routes`])
///
/// ## Example Endpoints
///
/// ```text
/// GET  /                                      Landing page
/// GET  /health                                Service health status
/// POST /chat/api/send                         Forward a chat message
/// GET  /api/v1/prompts/list/{revision_id}     Annotated prompt listing
/// POST /api/evaluate                          Run a submission evaluation
/// GET  /diagnostics/api/health                Backend health report
/// ```
///
/// [`pages::configure_routes`]: crate::routes::pages::configure_routes
/// [`health::configure_routes`]: crate::routes::health::configure_routes
/// [`chat::configure_routes`]: crate::routes::chat::configure_routes
/// [`prompts::configure_routes`]: crate::routes::prompts::configure_routes
/// [`evaluation::configure_routes`]: crate::routes::evaluation::configure_routes
/// [`diagnostics::configure_routes`]: crate::routes::diagnostics::configure_routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::configure_routes)
        .configure(health::configure_routes)
        .configure(prompts::configure_routes)
        .configure(evaluation::configure_routes)
        .service(web::scope("/chat").configure(chat::configure_routes))
        .service(web::scope("/diagnostics").configure(diagnostics::configure_routes));
}
