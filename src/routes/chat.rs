use actix_web::{HttpResponse, Responder, post, web};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;
use utoipa::ToSchema;

use crate::backend::BackendApi;

/// Request body for sending a chat message through the workflow.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// The user message forwarded to the workflow as `user_prompt`.
    pub message: String,
    /// Optional workflow selector, empty when the backend default applies.
    #[serde(default)]
    pub conversation_flow: String,
}

/// Request body for recording feedback on a previous chat message.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    /// Identifier of the message the feedback refers to.
    pub message_id: String,
    /// Free-form feedback payload, forwarded to the backend unchanged.
    pub feedback: Value,
}

/// # Send Chat Message
///
/// Forwards a chat message to the backend workflow API and relays the
/// response. When `conversation_flow` is set it is passed both in the request
/// body and as a query parameter so the backend routes the message to the
/// right workflow.
///
/// ## Response
///
/// - **200 OK**: Backend response body, unchanged
/// - **400 Bad Request**: Body is missing the `message` field
/// - **Other**: Backend status with an `error` description
#[utoipa::path(
    post,
    path = "/chat/api/send",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Backend chat response"),
        (status = 400, description = "Missing message field"),
        (status = 500, description = "Backend unreachable")
    ),
    tag = "Chat"
)]
#[post("/api/send")]
pub async fn send_message(
    req: web::Json<SendMessageRequest>,
    api: web::Data<dyn BackendApi>,
) -> impl Responder {
    let chat_request = json!({
        "user_prompt": req.message,
        "conversation_flow": req.conversation_flow,
    });

    let mut query = Vec::new();
    if !req.conversation_flow.is_empty() {
        query.push(("conversation_flow".to_string(), req.conversation_flow.clone()));
    }

    match api
        .post_json(
            "api/v1/chat".to_string(),
            query,
            chat_request,
            Duration::from_secs(30),
        )
        .await
    {
        Ok(resp) => super::relay(resp),
        Err(e) => {
            warn!("chat send failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Network error: {}", e)
            }))
        }
    }
}

/// # Record Message Feedback
///
/// Stores thumbs-up/down style feedback for a chat message by forwarding it
/// to the backend message store.
#[utoipa::path(
    post,
    path = "/chat/api/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback recorded"),
        (status = 400, description = "Missing message_id or feedback"),
        (status = 500, description = "Backend unreachable")
    ),
    tag = "Chat"
)]
#[post("/api/feedback")]
pub async fn send_feedback(
    req: web::Json<FeedbackRequest>,
    api: web::Data<dyn BackendApi>,
) -> impl Responder {
    let req = req.into_inner();
    let path = format!("api/v1/messages/{}/feedback", req.message_id);
    let body = json!({ "feedback": req.feedback });

    match api.put_json(path, body, Duration::from_secs(10)).await {
        Ok(resp) => super::relay(resp),
        Err(e) => {
            warn!("feedback relay failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Network error: {}", e)
            }))
        }
    }
}

/// # Send Custom Sample Message
///
/// Triggers the backend's canned sample conversation, used by the UI to
/// demonstrate the workflow without user input.
#[utoipa::path(
    post,
    path = "/chat/api/custom",
    responses(
        (status = 200, description = "Backend sample response"),
        (status = 500, description = "Backend unreachable")
    ),
    tag = "Chat"
)]
#[post("/api/custom")]
pub async fn send_custom_message(api: web::Data<dyn BackendApi>) -> impl Responder {
    match api
        .post_json(
            "api/v1/chat_custom_sample".to_string(),
            Vec::new(),
            Value::Null,
            Duration::from_secs(10),
        )
        .await
    {
        Ok(resp) => super::relay(resp),
        Err(e) => {
            warn!("custom sample failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Network error: {}", e)
            }))
        }
    }
}

/// Registers the chat endpoints, mounted under the `/chat` scope.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(send_message)
        .service(send_feedback)
        .service(send_custom_message);
}
