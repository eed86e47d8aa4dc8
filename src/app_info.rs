use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::health::{AppInfo, HealthStatus};

const DEFAULT_NAME: &str = "prompt-tuner";
const DEFAULT_VERSION: &str = "unknown";

/// Gathers application metadata from the project descriptor file.
///
/// Resolves the descriptor (`Cargo.toml`) relative to the crate root and scans
/// it line by line for the `name = ` and `version = ` entries. Missing file or
/// missing keys fall back to the documented defaults; a failed read is
/// reported through the `error` field instead of being propagated.
///
/// # Returns
/// An [`AppInfo`] value. This function never fails; degraded reads are
/// observable via `AppInfo.error`.
///
/// # Examples
/// ```
/// let info = prompt_tuner::app_info::get_app_info();
/// assert!(!info.name.is_empty());
/// assert!(!info.version.is_empty());
/// ```
pub fn get_app_info() -> AppInfo {
    read_app_info(&descriptor_path())
}

/// Parameterized variant of [`get_app_info`] used to point the scan at an
/// arbitrary descriptor file.
///
/// # Arguments
/// * `descriptor` - Path of the descriptor file to scan
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// let info = prompt_tuner::app_info::read_app_info(Path::new("/no/such/Cargo.toml"));
/// assert_eq!(info.name, "prompt-tuner");
/// assert_eq!(info.version, "unknown");
/// assert!(info.error.is_none());
/// ```
pub fn read_app_info(descriptor: &Path) -> AppInfo {
    let mut info = default_info();

    // An absent descriptor is the documented fallback case, not an error.
    if !descriptor.exists() {
        return info;
    }

    match fs::read_to_string(descriptor) {
        Ok(contents) => {
            for line in contents.lines() {
                let line = line.trim();
                if line.starts_with("name = ") {
                    info.name = parse_value(line);
                } else if line.starts_with("version = ") {
                    info.version = parse_value(line);
                }
            }
        }
        Err(e) => {
            info.error = Some(format!("Failed to read project info: {}", e));
        }
    }

    info
}

/// Generates the health check payload.
///
/// Calls [`get_app_info`] and maps its fields into a [`HealthStatus`] with a
/// freshly generated UTC timestamp. Always reports `"healthy"`; descriptor
/// problems surface in the app-info payload, never as a failed health check.
pub fn get_health_status() -> HealthStatus {
    HealthStatus::from_app_info(get_app_info())
}

/// Deployment environment name, from `APP_ENV` (default `"development"`).
pub fn environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Debug flag, from `APP_DEBUG` (case-insensitive `"true"` enables it).
pub fn debug_mode() -> bool {
    parse_debug_flag(env::var("APP_DEBUG").ok().as_deref())
}

fn parse_debug_flag(raw: Option<&str>) -> bool {
    raw.map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn default_info() -> AppInfo {
    AppInfo {
        name: DEFAULT_NAME.to_string(),
        version: DEFAULT_VERSION.to_string(),
        rust_version: env!("BUILD_RUSTC_VERSION").to_string(),
        environment: environment(),
        debug_mode: debug_mode(),
        error: None,
    }
}

// Value is the text between the first and second `=`, with surrounding
// whitespace and quote characters stripped.
fn parse_value(line: &str) -> String {
    line.split('=')
        .nth(1)
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

fn descriptor_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Writes a throwaway descriptor under the system temp dir and removes it
    // when dropped, so parallel tests never share a path.
    struct TempDescriptor {
        path: PathBuf,
    }

    impl TempDescriptor {
        fn new(label: &str, contents: &[u8]) -> Self {
            let path = env::temp_dir().join(format!(
                "prompt-tuner-{}-{}.toml",
                label,
                std::process::id()
            ));
            fs::write(&path, contents).expect("failed to write test descriptor");
            Self { path }
        }
    }

    impl Drop for TempDescriptor {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    #[test]
    fn test_parses_name_and_version_from_descriptor() {
        let descriptor = TempDescriptor::new(
            "parse",
            b"[package]\nname = \"prompt-tuner\"\nversion = \"0.2.0\"\nedition = \"2024\"\n",
        );

        let info = read_app_info(&descriptor.path);

        assert_eq!(info.name, "prompt-tuner");
        assert_eq!(info.version, "0.2.0");
        assert!(info.error.is_none());
    }

    #[test]
    fn test_strips_single_quotes_from_values() {
        let descriptor =
            TempDescriptor::new("quotes", b"name = 'quoted-app'\nversion = '1.0.0'\n");

        let info = read_app_info(&descriptor.path);

        assert_eq!(info.name, "quoted-app");
        assert_eq!(info.version, "1.0.0");
    }

    #[test]
    fn test_later_lines_overwrite_earlier_matches() {
        let descriptor = TempDescriptor::new(
            "overwrite",
            b"name = \"first\"\nversion = \"0.1.0\"\nname = \"second\"\n",
        );

        let info = read_app_info(&descriptor.path);

        assert_eq!(info.name, "second");
        assert_eq!(info.version, "0.1.0");
    }

    #[test]
    fn test_ignores_lines_without_the_exact_key_prefix() {
        let descriptor = TempDescriptor::new(
            "prefix",
            b"serde = { version = \"1.0\" }\nname_suffix = \"x\"\nname=\"compact\"\n",
        );

        let info = read_app_info(&descriptor.path);

        // None of those lines start with `name = ` or `version = `
        assert_eq!(info.name, "prompt-tuner");
        assert_eq!(info.version, "unknown");
    }

    #[test]
    fn test_missing_descriptor_returns_defaults_without_error() {
        let info = read_app_info(Path::new("/nonexistent/prompt-tuner/Cargo.toml"));

        assert_eq!(info.name, "prompt-tuner");
        assert_eq!(info.version, "unknown");
        assert!(info.error.is_none());
    }

    #[test]
    fn test_unreadable_descriptor_reports_error_with_defaults() {
        // Invalid UTF-8 makes the read fail the same way an encoding issue
        // would in production.
        let descriptor = TempDescriptor::new("binary", &[0xff, 0xfe, 0x00, 0x9f]);

        let info = read_app_info(&descriptor.path);

        assert_eq!(info.name, "prompt-tuner");
        assert_eq!(info.version, "unknown");
        let error = info.error.expect("read failure should be reported");
        assert!(error.starts_with("Failed to read project info:"));
    }

    #[test]
    fn test_get_app_info_reads_the_crate_manifest() {
        let info = get_app_info();

        // The crate's own Cargo.toml is the descriptor in development.
        assert_eq!(info.name, "prompt-tuner");
        assert_eq!(info.version, "0.2.0");
        assert!(info.error.is_none());
        assert!(!info.rust_version.is_empty());
    }

    #[test]
    fn test_app_info_name_and_version_are_never_empty() {
        let info = get_app_info();
        assert!(!info.name.is_empty());
        assert!(!info.version.is_empty());

        let fallback = read_app_info(Path::new("/nonexistent/Cargo.toml"));
        assert!(!fallback.name.is_empty());
        assert!(!fallback.version.is_empty());
    }

    #[test]
    fn test_health_status_is_healthy_with_utc_timestamp() {
        let status = get_health_status();

        assert_eq!(status.status, "healthy");
        assert!(status.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&status.timestamp).is_ok());
        assert_eq!(status.service, "prompt-tuner");
    }

    #[test]
    fn test_debug_flag_parsing_is_case_insensitive() {
        assert!(parse_debug_flag(Some("true")));
        assert!(parse_debug_flag(Some("TRUE")));
        assert!(parse_debug_flag(Some("True")));
        assert!(!parse_debug_flag(Some("false")));
        assert!(!parse_debug_flag(Some("1")));
        assert!(!parse_debug_flag(None));
    }

    #[test]
    fn test_parse_value_takes_text_between_first_and_second_equals() {
        assert_eq!(parse_value("name = \"prompt-tuner\""), "prompt-tuner");
        assert_eq!(parse_value("version = '0.2.0'"), "0.2.0");
        assert_eq!(parse_value("name = "), "");
    }
}
