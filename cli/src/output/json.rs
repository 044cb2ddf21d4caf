//! JSON output helpers.
//!
//! Provides the success and error objects printed by `--json` code paths.

use anyhow::{Context, Result};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the result of a successful launch.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_launched(name: &str, remote: &str) -> Result<String> {
    let obj = serde_json::json!({
        "name": name,
        "remote": remote,
        "status": "Running",
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
