use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

use crate::backend::BackendApi;

/// Evaluation runs walk every submission through the agent workflow, so they
/// get a much longer deadline than the interactive chat calls.
const EVALUATION_TIMEOUT: Duration = Duration::from_secs(120);

const REQUIRED_FIELDS: [&str; 3] = ["revision_id", "submissions", "criteria"];

fn revision_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// # Run a Submission Evaluation
///
/// Packages the submissions and criteria into a `submission-over-criteria`
/// workflow request, sends it to the backend chat API and reshapes the agent
/// transcript into per-agent evaluations plus the summary verdict.
///
/// ## Request
///
/// Requires `revision_id`, `submissions` and `criteria`. Optional fields:
/// `user_id`, `thread_id`, `identifier`, `additional_context`, `timestamp`.
///
/// ## Response
///
/// - **200 OK**: `{evaluation_id, thread_id, summary, evaluations, token_count, timestamp}`
/// - **400 Bad Request**: Missing body or required field
/// - **500 Internal Server Error**: Backend failure or malformed transcript
#[utoipa::path(
    post,
    path = "/api/evaluate",
    responses(
        (status = 200, description = "Formatted evaluation result"),
        (status = 400, description = "Missing required field"),
        (status = 500, description = "Backend failure or malformed transcript")
    ),
    tag = "Evaluation"
)]
#[post("/api/evaluate")]
pub async fn evaluate_submissions(
    body: web::Json<Value>,
    api: web::Data<dyn BackendApi>,
) -> impl Responder {
    let data = body.into_inner();

    if data.as_object().map_or(true, |o| o.is_empty()) {
        return HttpResponse::BadRequest().json(json!({ "error": "Request data is required" }));
    }

    for field in REQUIRED_FIELDS {
        if data.get(field).is_none() {
            return HttpResponse::BadRequest().json(json!({
                "error": format!("Field '{}' is required", field)
            }));
        }
    }

    let revision_id = revision_label(&data["revision_id"]);

    let user_prompt = json!({
        "revision_id": data["revision_id"],
        "identifier": data
            .get("identifier")
            .cloned()
            .unwrap_or_else(|| Value::String(format!("eval-{}", revision_id))),
        "submissions": data["submissions"],
        "criteria": data["criteria"],
        "additional_context": data
            .get("additional_context")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())),
    });
    let user_prompt = match serde_json::to_string(&user_prompt) {
        Ok(s) => s,
        Err(e) => {
            return HttpResponse::InternalServerError().json(json!({
                "error": format!("JSON parsing error: {}", e)
            }));
        }
    };

    let evaluation_request = json!({
        "conversation_flow": "submission-over-criteria",
        "user_id": data
            .get("user_id")
            .cloned()
            .unwrap_or_else(|| Value::String("prompt-tuner-user".to_string())),
        "thread_id": data
            .get("thread_id")
            .cloned()
            .unwrap_or_else(|| Value::String(format!("thread-{}", revision_id))),
        "user_prompt": user_prompt,
    });

    let result = match api
        .post_json(
            "api/v1/chat".to_string(),
            Vec::new(),
            evaluation_request,
            EVALUATION_TIMEOUT,
        )
        .await
    {
        Ok(resp) if resp.status == 200 => resp.body,
        Ok(resp) => {
            warn!("evaluation rejected upstream with status {}", resp.status);
            return HttpResponse::InternalServerError().json(json!({
                "error": format!("API request failed: backend returned status {}", resp.status)
            }));
        }
        Err(e) => {
            warn!("evaluation request failed: {}", e);
            return HttpResponse::InternalServerError().json(json!({
                "error": format!("API request failed: {}", e)
            }));
        }
    };

    // The backend returns the agent transcript as a JSON string.
    let raw_transcript = result
        .get("agent_response")
        .and_then(Value::as_str)
        .unwrap_or("[]");
    let transcript: Value = match serde_json::from_str(raw_transcript) {
        Ok(v) => v,
        Err(e) => {
            warn!("evaluation transcript did not parse: {}", e);
            return HttpResponse::InternalServerError().json(json!({
                "error": format!("JSON parsing error: {}", e)
            }));
        }
    };

    let mut summary = Value::Null;
    let mut evaluations = Vec::new();
    if let Some(chats) = transcript.as_array() {
        for chat in chats {
            let chat_data = &chat["__dict__"];
            if !chat_data.is_object() {
                continue;
            }

            let agent_name = chat_data["chat_name"].as_str().unwrap_or("");
            let content = chat_data["chat_response"]["chat_message"]["__dict__"]["content"]
                .as_str()
                .unwrap_or("");

            evaluations.push(json!({
                "agent": agent_name,
                "content": content,
                "tokens": chat_data.get("completion_tokens").cloned().unwrap_or(json!(0)),
            }));

            if agent_name == "summary" {
                summary = Value::String(content.to_string());
            }
        }
    }

    HttpResponse::Ok().json(json!({
        "evaluation_id": result.get("message_id").cloned().unwrap_or(Value::Null),
        "thread_id": result.get("thread_id").cloned().unwrap_or(Value::Null),
        "summary": summary,
        "evaluations": evaluations,
        "token_count": result.get("token_count").cloned().unwrap_or(json!(0)),
        "timestamp": data.get("timestamp").cloned().unwrap_or(Value::Null),
    }))
}

/// # List Prompt Revisions
///
/// Returns the revisions the UI can select. The backend does not expose
/// revision discovery yet, so this serves the known set.
#[utoipa::path(
    get,
    path = "/api/revisions",
    responses(
        (status = 200, description = "Available revision identifiers")
    ),
    tag = "Evaluation"
)]
#[get("/api/revisions")]
pub async fn list_revisions() -> impl Responder {
    HttpResponse::Ok().json(json!(["v1.2", "v1.3", "latest"]))
}

/// Registers the evaluation endpoints with the Actix-web service
/// configuration.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(evaluate_submissions).service(list_revisions);
}
