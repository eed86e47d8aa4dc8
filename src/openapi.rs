use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the API contract using OpenAPI 3.0 format with utoipa procedural macros.
/// This documentation serves as the source of truth for both API consumers and
/// automated documentation generators.
///
/// # Endpoints
/// - Health Check: `GET /health`
/// - Chat Proxy: `POST /chat/api/send`, `POST /chat/api/feedback`, `POST /chat/api/custom`
/// - Prompt Management: `GET /api/v1/prompts/list/{revision_id}`,
///   `GET /api/v1/prompts/view/{revision_id}/{filename}`,
///   `POST /api/v1/prompts/update/{revision_id}/{filename}`,
///   `POST /api/v1/prompts/create-default/{revision_id}`
/// - Evaluation: `POST /api/evaluate`, `GET /api/revisions`
/// - Diagnostics: `GET /diagnostics/api/health`, `GET /diagnostics/api/diagnostic`
///
/// # Schemas
/// - `HealthStatus`: Service status payload
/// - `AppInfo`: Project descriptor metadata
/// - `SendMessageRequest` / `FeedbackRequest`: Chat proxy input structures
///
/// # Note
/// The OpenAPI spec is generated at compile time from these annotations. Any changes
/// to the API surface should be reflected here first to maintain documentation accuracy.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::chat::send_message,
        crate::routes::chat::send_feedback,
        crate::routes::chat::send_custom_message,
        crate::routes::prompts::list_prompts,
        crate::routes::prompts::view_prompt,
        crate::routes::prompts::update_prompt,
        crate::routes::prompts::create_default_prompts,
        crate::routes::evaluation::evaluate_submissions,
        crate::routes::evaluation::list_revisions,
        crate::routes::diagnostics::backend_health,
        crate::routes::diagnostics::backend_diagnostic,
    ),
    components(
        schemas(
            crate::models::health::HealthStatus,
            crate::models::health::AppInfo,
            crate::routes::chat::SendMessageRequest,
            crate::routes::chat::FeedbackRequest
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Chat", description = "Chat proxy endpoints forwarding to the workflow backend"),
        (name = "Prompt Management", description = "Prompt template listing, editing and seeding"),
        (name = "Evaluation", description = "Submission-over-criteria evaluation runs"),
        (name = "Diagnostics", description = "Backend health and diagnostic proxies")
    ),
    info(
        description = "Front-end for tuning, testing and evaluating the prompts behind the submission evaluation workflow",
        title = "Prompt Tuner",
        version = "0.2.0",
    )
)]
pub struct ApiDoc;
