//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use anyhow::Result;
use thiserror::Error;

use crate::domain::{ClientConfig, CreateResponse, ImageSource, OperationHandle, ResolvedRemote};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failure reported by a remote client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("{message}")]
    Status { code: u16, message: String },
    /// A background operation finished unsuccessfully.
    #[error("{0}")]
    OperationFailed(String),
    /// The request never got an answer.
    #[error("{0}")]
    Transport(String),
    /// The answer could not be understood.
    #[error("invalid response from server: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns `true` for HTTP 404 answers.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code: 404, .. })
    }
}

// ── Remote Client Ports ───────────────────────────────────────────────────────

/// Calls against one connected remote.
#[allow(async_fn_in_trait)]
pub trait RemoteClient {
    /// Ask the remote to create a container. `name: None` lets the server
    /// pick one; `profiles: None` applies the server's default profiles.
    async fn create(
        &self,
        name: Option<&str>,
        source: &ImageSource,
        profiles: Option<&[String]>,
    ) -> Result<CreateResponse, ClientError>;

    /// Ask the remote to start a container, without timeout or stateful restore.
    async fn start(&self, name: &str) -> Result<OperationHandle, ClientError>;

    /// Block until `operation` finishes; a failed operation is an error.
    async fn wait_for_success(&self, operation: &OperationHandle) -> Result<(), ClientError>;
}

/// Builds a connected client for a resolved remote.
pub trait ClientConnector {
    type Client: RemoteClient;

    /// # Errors
    ///
    /// Returns an error if the remote's address cannot be used.
    fn connect(&self, remote: &ResolvedRemote) -> Result<Self::Client, ClientError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading of the client configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    fn load(&self) -> Result<ClientConfig>;
    /// Location the configuration is read from.
    fn path(&self) -> Result<std::path::PathBuf>;
}
