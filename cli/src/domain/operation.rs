//! Handles and responses for asynchronous remote operations.

use std::collections::HashMap;
use std::fmt;

/// Opaque reference to an in-flight remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle(String);

impl OperationHandle {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the service hands back when it accepts a create request.
#[derive(Debug, Clone)]
pub struct CreateResponse {
    pub operation: OperationHandle,
    /// Affected resources keyed by resource class. May be absent.
    pub resources: Option<HashMap<String, Vec<String>>>,
}

/// Image to create a container from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// Alias or fingerprint on the image remote.
    pub alias: String,
    /// Address of the image remote when it differs from the target remote.
    pub server: Option<String>,
}
