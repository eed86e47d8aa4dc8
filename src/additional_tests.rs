#[cfg(test)]
mod additional_coverage_tests {
    use crate::backend::{BackendApi, BackendResponse, MockBackendApi};
    use crate::models::health::{AppInfo, HealthStatus};
    use crate::openapi::ApiDoc;
    use crate::routes::chat::{FeedbackRequest, SendMessageRequest};
    // `{self}` imports only the `test` module, keeping the built-in `#[test]`
    // attribute un-shadowed for the synchronous tests below.
    use actix_web::test::{self};
    use actix_web::{App, web};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use utoipa::OpenApi;

    fn backend_data(mock: MockBackendApi) -> web::Data<dyn BackendApi> {
        web::Data::from(Arc::new(mock) as Arc<dyn BackendApi>)
    }

    #[actix_web::test]
    async fn test_full_route_configuration() {
        let app = test::init_service(
            App::new()
                .app_data(backend_data(MockBackendApi::new()))
                .configure(crate::routes::configure),
        )
        .await;

        // Every locally-served GET surface answers through the composed
        // configuration without touching the backend.
        for uri in [
            "/",
            "/workflow-process",
            "/manage-prompt",
            "/evaluate",
            "/health",
            "/api/revisions",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200, "GET {} failed", uri);
        }
    }

    #[actix_web::test]
    async fn test_unknown_route_returns_404() {
        let app = test::init_service(
            App::new()
                .app_data(backend_data(MockBackendApi::new()))
                .configure(crate::routes::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/no-such-page").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_chat_routes_only_live_under_scope() {
        let app = test::init_service(
            App::new()
                .app_data(backend_data(MockBackendApi::new()))
                .configure(crate::routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/send")
            .set_json(json!({ "message": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_proxy_scopes_share_error_shape() {
        let mut mock = MockBackendApi::new();
        mock.expect_get_json().returning(|_, _| {
            Ok(BackendResponse {
                status: 418,
                body: Value::Null,
            })
        });
        mock.expect_post_json().returning(|_, _, _, _| {
            Ok(BackendResponse {
                status: 418,
                body: Value::Null,
            })
        });

        let app = test::init_service(
            App::new()
                .app_data(backend_data(mock))
                .configure(crate::routes::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/diagnostics/api/health")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 418);
        let diagnostics_body: Value =
            serde_json::from_slice(&test::read_body(resp).await).unwrap();

        let req = test::TestRequest::post()
            .uri("/chat/api/send")
            .set_json(json!({ "message": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 418);
        let chat_body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();

        assert_eq!(diagnostics_body, chat_body);
        assert_eq!(chat_body["error"], "API request failed with status 418");
    }

    #[test]
    fn test_openapi_document_generation() {
        let doc = ApiDoc::openapi();
        let rendered = serde_json::to_string(&doc).unwrap();

        assert!(rendered.contains("Prompt Tuner"));
        assert!(rendered.contains("/health"));
        assert!(rendered.contains("/api/evaluate"));
        assert!(rendered.contains("/chat/api/send"));
        assert!(rendered.contains("/api/v1/prompts/create-default/{revision_id}"));
    }

    #[test]
    fn test_send_message_request_deserialization() {
        let send: SendMessageRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(send.message, "hi");
        assert_eq!(send.conversation_flow, "");

        let send: SendMessageRequest =
            serde_json::from_str(r#"{"message":"hi","conversation_flow":"classification"}"#)
                .unwrap();
        assert_eq!(send.conversation_flow, "classification");

        let missing: Result<SendMessageRequest, _> = serde_json::from_str("{}");
        assert!(missing.is_err());
    }

    #[test]
    fn test_feedback_request_accepts_any_feedback_shape() {
        let feedback: FeedbackRequest =
            serde_json::from_str(r#"{"message_id":"m-1","feedback":"up"}"#).unwrap();
        assert_eq!(feedback.feedback, json!("up"));

        let feedback: FeedbackRequest =
            serde_json::from_str(r#"{"message_id":"m-1","feedback":{"rating":5,"note":"ok"}}"#)
                .unwrap();
        assert_eq!(feedback.feedback["rating"], 5);
    }

    #[test]
    fn test_app_info_round_trip_with_unicode() {
        let info = AppInfo {
            name: "tüner-prømpt".to_string(),
            version: "1.0.0-ß".to_string(),
            rust_version: "1.84.0".to_string(),
            environment: "stagíng".to_string(),
            debug_mode: true,
            error: None,
        };

        let rendered = serde_json::to_string(&info).unwrap();
        let parsed: AppInfo = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.name, "tüner-prømpt");
        assert_eq!(parsed.environment, "stagíng");
        assert!(parsed.error.is_none());
    }

    #[test]
    fn test_health_status_round_trip() {
        let status = HealthStatus {
            status: "healthy".to_string(),
            timestamp: "2025-07-01T00:00:00.000000Z".to_string(),
            service: "prompt-tuner".to_string(),
            version: "0.2.0".to_string(),
            rust_version: "1.84.0".to_string(),
            environment: "development".to_string(),
        };

        let rendered = serde_json::to_string(&status).unwrap();
        let parsed: HealthStatus = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.status, "healthy");
        assert_eq!(parsed.version, "0.2.0");
    }
}
