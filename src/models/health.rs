use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Application Metadata
///
/// Dynamic information about the running service, gathered fresh on every
/// health check. Name and version come from the project descriptor file when
/// it can be read; otherwise the documented defaults are used and `error`
/// carries the cause.
///
/// ## Fields
/// - `name`: Application name from the descriptor (default `"prompt-tuner"`)
/// - `version`: Application version from the descriptor (default `"unknown"`)
/// - `rust_version`: Version of the Rust toolchain the binary was built with
/// - `environment`: Deployment environment name (default `"development"`)
/// - `debug_mode`: Whether the debug flag is enabled
/// - `error`: Present only when reading the descriptor failed
///
/// ## Example JSON
/// ```json
/// {
///   "name": "prompt-tuner",
///   "version": "0.2.0",
///   "rust_version": "1.84.0",
///   "environment": "development",
///   "debug_mode": false
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub rust_version: String,
    pub environment: String,
    pub debug_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// # Health Status Response
///
/// The payload returned by the health check endpoint. Derived from [`AppInfo`]
/// at request time; `status` is always `"healthy"` because descriptor problems
/// are reported inside the app-info payload instead of failing the endpoint.
///
/// ## Fields
/// - `status`: Constant `"healthy"`
/// - `timestamp`: ISO 8601 UTC timestamp with a trailing `Z`
/// - `service`: Application name (= `AppInfo.name`)
/// - `version`: Application version
/// - `rust_version`: Toolchain version the binary was built with
/// - `environment`: Deployment environment name
///
/// ## Example JSON
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2024-03-10T15:30:45.123456Z",
///   "service": "prompt-tuner",
///   "version": "0.2.0",
///   "rust_version": "1.84.0",
///   "environment": "development"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
    pub rust_version: String,
    pub environment: String,
}

impl HealthStatus {
    pub fn from_app_info(info: AppInfo) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            service: info.name,
            version: info.version,
            rust_version: info.rust_version,
            environment: info.environment,
        }
    }
}
