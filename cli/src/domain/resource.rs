//! Recovering a server-assigned container name from a create response.

use std::collections::HashMap;

use crate::domain::error::LaunchError;

/// Resource class under which new containers are reported.
pub const CONTAINERS_CLASS: &str = "containers";

/// Split `/<version>/containers/<name>` into `(version, name)`.
///
/// Separators become spaces and the result must scan as exactly
/// `<version> containers <name>`.
///
/// # Errors
///
/// Returns `MalformedResourcePath` when anything other than the two values
/// is present.
pub fn parse_resource_path(path: &str) -> Result<(String, String), LaunchError> {
    let to_scan = path.replace('/', " ");
    let tokens: Vec<&str> = to_scan.split_whitespace().collect();
    match tokens.as_slice() {
        [version, CONTAINERS_CLASS, name] => Ok(((*version).to_string(), (*name).to_string())),
        _ => Err(LaunchError::MalformedResourcePath(path.to_string())),
    }
}

/// Name of the container reported first under `containers`.
///
/// # Errors
///
/// `NoResourcesReported` if nothing was reported, `MalformedResourcePath` if
/// the first path does not parse, `VersionMismatch` if it was issued by a
/// different API version than `expected_version`.
pub fn container_name(
    resources: Option<&HashMap<String, Vec<String>>>,
    expected_version: &str,
) -> Result<String, LaunchError> {
    let first = resources
        .and_then(|r| r.get(CONTAINERS_CLASS))
        .and_then(|paths| paths.first())
        .ok_or(LaunchError::NoResourcesReported)?;

    let (version, name) = parse_resource_path(first)?;
    if version != expected_version {
        return Err(LaunchError::VersionMismatch {
            expected: expected_version.to_string(),
            found: version,
        });
    }
    Ok(name)
}
