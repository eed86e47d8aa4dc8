use actix_web::{HttpResponse, Responder, get};

const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const WORKFLOW_PROCESS_PAGE: &str = include_str!("../../templates/workflow_process.html");
const MANAGE_PROMPT_PAGE: &str = include_str!("../../templates/manage_prompt.html");
const EVALUATE_PAGE: &str = include_str!("../../templates/evaluate.html");

fn render(page: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

/// # Landing Page
///
/// Serves the main page with links to the workflow, prompt management and
/// evaluation views.
#[get("/")]
pub async fn index() -> impl Responder {
    render(INDEX_PAGE)
}

/// Serves the workflow process walkthrough page.
#[get("/workflow-process")]
pub async fn workflow_process() -> impl Responder {
    render(WORKFLOW_PROCESS_PAGE)
}

/// Serves the prompt management page.
#[get("/manage-prompt")]
pub async fn manage_prompt() -> impl Responder {
    render(MANAGE_PROMPT_PAGE)
}

/// Serves the submission evaluation page.
#[get("/evaluate")]
pub async fn evaluate() -> impl Responder {
    render(EVALUATE_PAGE)
}

/// Registers the template pages with the Actix-web service configuration.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(index)
        .service(workflow_process)
        .service(manage_prompt)
        .service(evaluate);
}
