use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

/// Reply from the backend API: the HTTP status plus the decoded JSON body.
///
/// The body is decoded only for 200 responses; error statuses carry
/// `Value::Null` because the proxy layer reports them by status code alone.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub body: Value,
}

/// Transport seam for the prompt-engineering backend API.
///
/// Route handlers depend on this trait rather than a concrete HTTP client so
/// tests can substitute a mock. Errors are stringly typed: transport and
/// decode failures collapse into a message the caller wraps into its own
/// error payload.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn get_json(
        &self,
        path: String,
        timeout: Duration,
    ) -> Result<BackendResponse, String>;

    async fn post_json(
        &self,
        path: String,
        query: Vec<(String, String)>,
        body: Value,
        timeout: Duration,
    ) -> Result<BackendResponse, String>;

    async fn put_json(
        &self,
        path: String,
        body: Value,
        timeout: Duration,
    ) -> Result<BackendResponse, String>;
}

/// reqwest-backed implementation of [`BackendApi`].
#[derive(Debug, Clone)]
pub struct HttpBackendApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackendApi {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to create HTTP client");

        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from `API_BASE_URL` (default `http://127.0.0.1:8000`).
    pub fn from_env() -> Self {
        Self::new(
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
        )
    }

    /// Base URL the client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode(resp: reqwest::Response) -> Result<BackendResponse, String> {
        let status = resp.status().as_u16();
        let body = if status == 200 {
            resp.json::<Value>()
                .await
                .map_err(|e| format!("invalid JSON from backend: {}", e))?
        } else {
            Value::Null
        };
        Ok(BackendResponse { status, body })
    }
}

#[async_trait]
impl BackendApi for HttpBackendApi {
    async fn get_json(
        &self,
        path: String,
        timeout: Duration,
    ) -> Result<BackendResponse, String> {
        let resp = self
            .http
            .get(self.url(&path))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::decode(resp).await
    }

    async fn post_json(
        &self,
        path: String,
        query: Vec<(String, String)>,
        body: Value,
        timeout: Duration,
    ) -> Result<BackendResponse, String> {
        let mut req = self.http.post(self.url(&path)).timeout(timeout);
        // A null body mirrors a bare POST with no payload.
        if !body.is_null() {
            req = req.json(&body);
        }
        if !query.is_empty() {
            req = req.query(&query);
        }
        let resp = req.send().await.map_err(|e| e.to_string())?;
        Self::decode(resp).await
    }

    async fn put_json(
        &self,
        path: String,
        body: Value,
        timeout: Duration,
    ) -> Result<BackendResponse, String> {
        let resp = self
            .http
            .put(self.url(&path))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_paths_without_duplicate_slashes() {
        let api = HttpBackendApi::new("http://backend:8000/");

        assert_eq!(api.base_url(), "http://backend:8000");
        assert_eq!(api.url("/api/v1/chat"), "http://backend:8000/api/v1/chat");
        assert_eq!(api.url("api/v1/chat"), "http://backend:8000/api/v1/chat");
    }

    #[test]
    fn test_from_env_falls_back_to_local_backend() {
        // No test sets API_BASE_URL, so the default applies.
        let api = HttpBackendApi::from_env();
        assert_eq!(api.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_unreachable_backend_reports_transport_error() {
        // Port 1 is never bound in the test environment.
        let api = HttpBackendApi::new("http://127.0.0.1:1");

        let result = api
            .get_json("api/v1/health".to_string(), Duration::from_millis(500))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_round_trip_returns_configured_response() {
        let mut mock = MockBackendApi::new();
        mock.expect_get_json()
            .withf(|path, _| path == "api/v1/health")
            .returning(|_, _| {
                Ok(BackendResponse {
                    status: 200,
                    body: serde_json::json!({"status": "healthy"}),
                })
            });

        let resp = mock
            .get_json("api/v1/health".to_string(), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["status"], "healthy");
    }
}
