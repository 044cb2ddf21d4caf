//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::launch::LaunchPhase;

// ── Launch errors ─────────────────────────────────────────────────────────────

/// Everything that can stop a launch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("wrong number of arguments: expected <image> [<name>], got {0}")]
    InvalidArgumentCount(usize),

    #[error("no image given")]
    MissingImage,

    #[error("Ephemeral containers not yet supported")]
    EphemeralUnsupported,

    #[error("remote '{0}' doesn't exist")]
    UnknownRemote(String),

    #[error("image doesn't exist")]
    ImageNotFound,

    #[error("{0}")]
    RemoteError(String),

    #[error("operation failed: {0}")]
    OperationFailed(String),

    #[error("didn't get any affected resources from server")]
    NoResourcesReported,

    #[error("bad number of things scanned from resource '{0}'")]
    MalformedResourcePath(String),

    #[error("got bad version: expected '{expected}', server reported '{found}'")]
    VersionMismatch { expected: String, found: String },
}

impl LaunchError {
    /// Stable machine-readable code, used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgumentCount(_) => "invalid_argument_count",
            Self::MissingImage => "missing_image",
            Self::EphemeralUnsupported => "ephemeral_unsupported",
            Self::UnknownRemote(_) => "unknown_remote",
            Self::ImageNotFound => "image_not_found",
            Self::RemoteError(_) => "remote_error",
            Self::OperationFailed(_) => "operation_failed",
            Self::NoResourcesReported => "no_resources_reported",
            Self::MalformedResourcePath(_) => "malformed_resource_path",
            Self::VersionMismatch { .. } => "version_mismatch",
        }
    }
}

/// A launch that stopped in `phase`.
///
/// When `created` is set the container already exists on the remote and is
/// left there; `instance` names it when the name was known at that point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{phase}: {error}")]
pub struct LaunchFailure {
    pub phase: LaunchPhase,
    pub created: bool,
    pub instance: Option<String>,
    pub error: LaunchError,
}

impl LaunchFailure {
    #[must_use]
    pub fn new(phase: LaunchPhase, error: LaunchError) -> Self {
        Self {
            phase,
            created: false,
            instance: None,
            error,
        }
    }

    /// Mark the failure as happening after the container was provisioned.
    #[must_use]
    pub fn after_create(mut self, instance: Option<&str>) -> Self {
        self.created = true;
        self.instance = instance.map(str::to_owned);
        self
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("remote '{0}' doesn't exist")]
    UnknownRemote(String),

    #[error("invalid address for remote '{remote}': {addr} (expected unix://, https:// or http://)")]
    InvalidAddress { remote: String, addr: String },
}

impl From<ConfigError> for LaunchError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownRemote(name) => Self::UnknownRemote(name),
            other @ ConfigError::InvalidAddress { .. } => Self::RemoteError(other.to_string()),
        }
    }
}
