use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// REST API version spoken by this client.
pub const API_VERSION: &str = "1.0";

/// Resource class under which containers are reported.
pub const CONTAINERS: &str = "containers";

/// Kind of a response envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Sync,
    Async,
    Error,
}

/// Standard response envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_code: u16,
    /// URL of the background operation (async responses only).
    #[serde(default)]
    pub operation: String,
    /// Resources affected by the request, keyed by resource class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub error_code: u16,
    #[serde(default)]
    pub error: String,
}

impl Response {
    /// Returns `true` for error envelopes.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == ResponseType::Error
    }
}

/// Where a new container's root filesystem comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerSource {
    /// Always `"image"` for launches.
    #[serde(rename = "type")]
    pub kind: String,
    /// Image alias or fingerprint.
    pub alias: String,
    /// Address of the remote hosting the image, when it isn't the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

impl ContainerSource {
    #[must_use]
    pub fn image(alias: &str, server: Option<&str>) -> Self {
        Self {
            kind: "image".to_string(),
            alias: alias.to_string(),
            server: server.map(str::to_owned),
        }
    }
}

/// Body of `POST /1.0/containers`.
///
/// `profiles` is tri-state on the wire: an absent key lets the server apply
/// its default profile set, an empty array applies no profile at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainersPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    pub source: ContainerSource,
}

/// Body of `PUT /1.0/containers/<name>/state`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerStatePut {
    pub action: String,
    /// Seconds to wait, `-1` waits forever.
    pub timeout: i32,
    pub force: bool,
    pub stateful: bool,
}

impl ContainerStatePut {
    /// Plain start: no timeout, no forced action, no stateful restore.
    #[must_use]
    pub fn start() -> Self {
        Self {
            action: "start".to_string(),
            timeout: -1,
            force: false,
            stateful: false,
        }
    }
}

/// Path of the containers collection.
#[must_use]
pub fn containers_path() -> String {
    format!("/{API_VERSION}/{CONTAINERS}")
}

/// Path of a single container, as reported in `resources`.
#[must_use]
pub fn container_path(name: &str) -> String {
    format!("/{API_VERSION}/{CONTAINERS}/{name}")
}

/// Path of a single container's state endpoint.
#[must_use]
pub fn container_state_path(name: &str) -> String {
    format!("/{API_VERSION}/{CONTAINERS}/{name}/state")
}
