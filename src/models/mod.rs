/// # Health Payload Models
///
/// Data shapes backing the health check endpoint: [`health::AppInfo`] with the
/// service metadata gathered from the project descriptor and environment, and
/// [`health::HealthStatus`] derived from it per request.
///
/// ## Serialization
/// Both implement `Serialize`/`Deserialize` for JSON; `AppInfo.error` is
/// omitted from the output when unset.
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
pub mod health;
