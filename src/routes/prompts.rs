use actix_web::{HttpResponse, Responder, get, post, web};
use futures::future::join_all;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

use crate::backend::BackendApi;

const PROMPT_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata and default content for one required workflow prompt template.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub filename: &'static str,
    pub agent_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub default_content: &'static str,
}

/// The prompt templates the submission-over-criteria workflow requires.
///
/// Files reported by the backend that are not in this catalog are ignored by
/// the listing endpoint, and `create-default` seeds exactly these templates.
pub const REQUIRED_PROMPTS: &[PromptTemplate] = &[
    PromptTemplate {
        filename: "submission_evaluator_agent_prompt.jinja",
        agent_name: "submission_evaluator_agent",
        display_name: "Submission Evaluator",
        description: "Evaluates individual submissions against criteria",
        default_content: r#"You are an expert submission evaluator. Your job is to evaluate submissions against specific criteria.

Evaluate each submission carefully and provide detailed feedback on how well it meets the criteria.

Provide your evaluation in a structured format with scores and justifications.

Consider the following aspects:
- How well the submission addresses the core problem
- The quality and depth of the proposed solution
- Technical accuracy and completeness
- Clarity and presentation quality

Format your response as a detailed evaluation with specific scores and clear justifications for each criterion."#,
    },
    PromptTemplate {
        filename: "criteria_analyzer_agent_prompt.jinja",
        agent_name: "criteria_analyzer_agent",
        display_name: "Criteria Analyzer",
        description: "Analyzes and interprets evaluation criteria",
        default_content: r#"You are an expert criteria analyzer. Your job is to analyze and interpret evaluation criteria to ensure consistent assessment.

Break down the criteria into specific, measurable components.

Provide clear guidance on how each criterion should be evaluated.

Consider the following:
- Define each criterion in specific, measurable terms
- Provide evaluation guidelines for consistency
- Identify potential scoring scales or rating systems
- Highlight important considerations for each criterion

Format your response as a structured breakdown with clear evaluation guidance."#,
    },
    PromptTemplate {
        filename: "feasibility_agent_prompt.jinja",
        agent_name: "feasibility_agent",
        display_name: "Feasibility Analyst",
        description: "Analyzes the feasibility and practicality of submissions",
        default_content: r#"You are an expert feasibility analyst. Your job is to evaluate the practical viability and implementation aspects of submissions.

Analyze each submission for:
- Technical feasibility and implementation challenges
- Resource requirements (time, budget, personnel)
- Risk assessment and mitigation strategies
- Timeline and milestone considerations
- Dependencies and constraints

Consider the following factors:
- Current technology limitations and capabilities
- Market conditions and external factors
- Organizational capacity and capabilities
- Regulatory and compliance requirements

Format your response with detailed feasibility assessments and risk evaluations."#,
    },
    PromptTemplate {
        filename: "impact_agent_prompt.jinja",
        agent_name: "impact_agent",
        display_name: "Impact Assessor",
        description: "Evaluates the potential impact and effectiveness of submissions",
        default_content: r#"You are an expert impact assessor. Your job is to evaluate the potential impact, benefits, and long-term effectiveness of submissions.

Analyze each submission for:
- Expected outcomes and benefits
- Scalability and long-term sustainability
- Cost-benefit analysis
- Stakeholder impact and user experience
- Innovation and competitive advantage

Consider the following dimensions:
- Short-term vs. long-term benefits
- Quantifiable vs. qualitative impacts
- Direct vs. indirect effects
- Positive vs. negative consequences

Format your response with comprehensive impact assessments and benefit projections."#,
    },
    PromptTemplate {
        filename: "summary_prompt.jinja",
        agent_name: "summary",
        display_name: "Summary Generator & Selector",
        description: "Generates comprehensive evaluation reports and selects the best submission",
        default_content: r#"You are an expert evaluator and decision maker. Your job is to generate comprehensive evaluation reports and select the best submission based on all agent analyses.

You will receive evaluation results from multiple specialized agents:
1. Submission Evaluator Agent - Overall evaluation against criteria
2. Criteria Analyzer Agent - Criteria interpretation and standards
3. Feasibility Agent - Practical implementation analysis
4. Impact Agent - Potential impact and effectiveness assessment

IMPORTANT: You have access to these tools - USE THEM to get detailed information:
- get_submission_details(submission_id): Get full details about any submission by its ID
- get_criteria_breakdown(): Get detailed breakdown of evaluation criteria

Your process:
1. FIRST: Call get_criteria_breakdown() to understand criteria and see all submission IDs
2. Review all agent evaluations and consolidate findings
3. For each submission, call get_submission_details(submission_id) to get full content
4. Compare submissions objectively using all evaluation dimensions
5. Select the best submission with detailed justification

Structure your response as:
## Evaluation Summary
[Overview of evaluation process and methodology]

## Submissions Evaluated
- **ID: sub_XXX** - [Title] by [Author]: [Comprehensive evaluation summary]

## Agent Analysis Synthesis
[Key insights from all specialized agents]

## Selected Submission
**Winner**: [ID and Title]

**Justification**: Detailed reasoning with specific examples from submission content

**Comparative Analysis**: Why this submission outperformed others

**Key Strengths**: What made this submission exceptional across all evaluation dimensions

Remember: Always use the tools to access detailed submission information and make data-driven decisions."#,
    },
    PromptTemplate {
        filename: "user_proxy_prompt.jinja",
        agent_name: "user_proxy",
        display_name: "User Proxy",
        description: "Coordinates agent communication",
        default_content: r#"You are a user proxy agent. Your job is to coordinate communication between agents.

Facilitate smooth communication and ensure all agents have the information they need.

Help maintain workflow efficiency.

Your role is to:
- Coordinate information flow between agents
- Ensure all agents have necessary context
- Facilitate clear communication
- Help maintain the evaluation workflow

Keep your responses concise and focused on coordination."#,
    },
];

/// Looks up a required prompt template by its backend filename.
pub fn find_template(filename: &str) -> Option<&'static PromptTemplate> {
    REQUIRED_PROMPTS.iter().find(|p| p.filename == filename)
}

fn upstream_error(status: u16) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "error": format!("API request failed with status {}", status)
    }))
}

/// # List Prompts For a Revision
///
/// Fetches the file listing for a prompt revision from the backend and
/// annotates each known template with its display metadata. Files the
/// workflow does not require are left out of the response.
///
/// ## Response
///
/// - **200 OK**: Array of `{filename, display_name, description, agent_name}`
/// - **500 Internal Server Error**: Backend failure, body carries `error`
#[utoipa::path(
    get,
    path = "/api/v1/prompts/list/{revision_id}",
    params(("revision_id" = String, Path, description = "Prompt revision identifier")),
    responses(
        (status = 200, description = "Annotated prompt listing"),
        (status = 500, description = "Backend failure")
    ),
    tag = "Prompt Management"
)]
#[get("/api/v1/prompts/list/{revision_id}")]
pub async fn list_prompts(
    path: web::Path<String>,
    api: web::Data<dyn BackendApi>,
) -> impl Responder {
    let revision_id = path.into_inner();

    match api
        .get_json(
            format!("api/v1/prompts/list/{}", revision_id),
            PROMPT_API_TIMEOUT,
        )
        .await
    {
        Ok(resp) if resp.status == 200 => {
            let files = resp
                .body
                .get("files")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            let details: Vec<Value> = files
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|file| {
                    find_template(file).map(|p| {
                        json!({
                            "filename": p.filename,
                            "display_name": p.display_name,
                            "description": p.description,
                            "agent_name": p.agent_name,
                        })
                    })
                })
                .collect();

            HttpResponse::Ok().json(details)
        }
        Ok(resp) => upstream_error(resp.status),
        Err(e) => {
            warn!("prompt listing failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e }))
        }
    }
}

/// # View a Prompt
///
/// Fetches one prompt's content from the backend. Known templates are
/// returned with their display metadata, unknown files with content only.
#[utoipa::path(
    get,
    path = "/api/v1/prompts/view/{revision_id}/{filename}",
    params(
        ("revision_id" = String, Path, description = "Prompt revision identifier"),
        ("filename" = String, Path, description = "Prompt template filename")
    ),
    responses(
        (status = 200, description = "Prompt content with metadata"),
        (status = 500, description = "Backend failure")
    ),
    tag = "Prompt Management"
)]
#[get("/api/v1/prompts/view/{revision_id}/{filename}")]
pub async fn view_prompt(
    path: web::Path<(String, String)>,
    api: web::Data<dyn BackendApi>,
) -> impl Responder {
    let (revision_id, filename) = path.into_inner();

    match api
        .get_json(
            format!("api/v1/prompts/view/{}/{}", revision_id, filename),
            PROMPT_API_TIMEOUT,
        )
        .await
    {
        Ok(resp) if resp.status == 200 => match find_template(&filename) {
            Some(p) => HttpResponse::Ok().json(json!({
                "content": resp.body,
                "filename": filename,
                "display_name": p.display_name,
                "description": p.description,
                "agent_name": p.agent_name,
            })),
            None => HttpResponse::Ok().json(json!({
                "content": resp.body,
                "filename": filename,
            })),
        },
        Ok(resp) => upstream_error(resp.status),
        Err(e) => {
            warn!("prompt fetch failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e }))
        }
    }
}

/// # Update a Prompt
///
/// Forwards new prompt content to the backend. The request body must carry a
/// `content` field; any additional fields such as `metadata` are passed
/// through unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/prompts/update/{revision_id}/{filename}",
    params(
        ("revision_id" = String, Path, description = "Prompt revision identifier"),
        ("filename" = String, Path, description = "Prompt template filename")
    ),
    responses(
        (status = 200, description = "Backend update response"),
        (status = 400, description = "Missing content field"),
        (status = 500, description = "Backend failure")
    ),
    tag = "Prompt Management"
)]
#[post("/api/v1/prompts/update/{revision_id}/{filename}")]
pub async fn update_prompt(
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    api: web::Data<dyn BackendApi>,
) -> impl Responder {
    let (revision_id, filename) = path.into_inner();
    let body = body.into_inner();

    if body.get("content").is_none() {
        return HttpResponse::BadRequest().json(json!({ "error": "Content is required" }));
    }

    match api
        .post_json(
            format!("api/v1/prompts/update/{}/{}", revision_id, filename),
            Vec::new(),
            body,
            PROMPT_API_TIMEOUT,
        )
        .await
    {
        Ok(resp) if resp.status == 200 => HttpResponse::Ok().json(resp.body),
        Ok(resp) => upstream_error(resp.status),
        Err(e) => {
            warn!("prompt update failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e }))
        }
    }
}

/// # Create Default Prompts
///
/// Seeds a revision with the default content for every required template.
/// The updates run concurrently; if any of them fails the whole request is
/// reported as failed.
///
/// ## Example Response
///
/// ```json
/// {
///   "message": "All default prompts created successfully",
///   "results": [
///     {"filename": "summary_prompt.jinja", "status": "created", "display_name": "Summary Generator & Selector"}
///   ]
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/prompts/create-default/{revision_id}",
    params(("revision_id" = String, Path, description = "Prompt revision identifier")),
    responses(
        (status = 200, description = "All templates created"),
        (status = 500, description = "At least one template failed")
    ),
    tag = "Prompt Management"
)]
#[post("/api/v1/prompts/create-default/{revision_id}")]
pub async fn create_default_prompts(
    path: web::Path<String>,
    api: web::Data<dyn BackendApi>,
) -> impl Responder {
    let revision_id = path.into_inner();

    let updates = REQUIRED_PROMPTS.iter().map(|prompt| {
        let api = api.clone();
        let path = format!("api/v1/prompts/update/{}/{}", revision_id, prompt.filename);
        async move {
            let body = json!({
                "content": prompt.default_content,
                "metadata": {
                    "agent_name": prompt.agent_name,
                    "description": prompt.description,
                },
            });

            let resp = api
                .post_json(path, Vec::new(), body, PROMPT_API_TIMEOUT)
                .await?;
            if resp.status != 200 {
                return Err(format!("API request failed with status {}", resp.status));
            }

            Ok::<Value, String>(json!({
                "filename": prompt.filename,
                "status": "created",
                "display_name": prompt.display_name,
            }))
        }
    });

    let mut results = Vec::with_capacity(REQUIRED_PROMPTS.len());
    for outcome in join_all(updates).await {
        match outcome {
            Ok(entry) => results.push(entry),
            Err(e) => {
                warn!("default prompt creation failed: {}", e);
                return HttpResponse::InternalServerError().json(json!({ "error": e }));
            }
        }
    }

    HttpResponse::Ok().json(json!({
        "message": "All default prompts created successfully",
        "results": results,
    }))
}

/// Registers the prompt management endpoints with the Actix-web service
/// configuration.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(list_prompts)
        .service(view_prompt)
        .service(update_prompt)
        .service(create_default_prompts);
}
