//! Background operation bodies.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a background operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Running,
    Success,
    Failure,
    Cancelled,
    /// Any status this client does not know, such as `Cancelling`.
    #[serde(other)]
    Unknown,
}

impl OperationStatus {
    /// Returns `true` once the operation can no longer change.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::Cancelled)
    }
}

/// Operation object, as found in the metadata of `GET <operation>/wait`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub id: String,
    pub status: OperationStatus,
    #[serde(default)]
    pub status_code: u16,
    /// Failure reason, empty on success.
    #[serde(default)]
    pub err: String,
}

/// Path of the blocking wait endpoint for an operation URL.
#[must_use]
pub fn wait_path(operation: &str) -> String {
    format!("{}/wait", operation.trim_end_matches('/'))
}
