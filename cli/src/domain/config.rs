//! Domain types and validators for client configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Name of the built-in remote pointing at the local daemon.
pub const LOCAL_REMOTE: &str = "local";

/// Socket of the local daemon.
pub const LOCAL_ADDR: &str = "unix:///var/lib/lxd/unix.socket";

/// Address schemes a remote may use.
pub const VALID_SCHEMES: &[&str] = &["unix://", "https://", "http://"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.config/lxc/config.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Remote used when a token carries no `remote:` prefix.
    #[serde(default = "default_remote")]
    pub default_remote: String,
    /// Known remotes by name.
    #[serde(default)]
    pub remotes: BTreeMap<String, RemoteEndpoint>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_remote: default_remote(),
            remotes: BTreeMap::new(),
        }
    }
}

/// Connection parameters of one remote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteEndpoint {
    /// `unix:///path/to/socket`, `https://host:8443` or `http://host:port`.
    pub addr: String,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,
}

/// A remote name after default substitution, with its endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRemote {
    pub name: String,
    pub endpoint: RemoteEndpoint,
}

fn default_remote() -> String {
    LOCAL_REMOTE.to_string()
}

impl ClientConfig {
    /// Look up a remote; the empty name stands for `default_remote`.
    ///
    /// `local` is always known unless the file overrides it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRemote` if no remote by that name exists.
    pub fn resolve(&self, remote: &str) -> Result<ResolvedRemote, ConfigError> {
        let name = if remote.is_empty() {
            self.default_remote.as_str()
        } else {
            remote
        };
        let endpoint = match self.remotes.get(name) {
            Some(endpoint) => endpoint.clone(),
            None if name == LOCAL_REMOTE => RemoteEndpoint {
                addr: LOCAL_ADDR.to_string(),
                insecure: false,
            },
            None => return Err(ConfigError::UnknownRemote(name.to_string())),
        };
        Ok(ResolvedRemote {
            name: name.to_string(),
            endpoint,
        })
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a remote address scheme.
///
/// # Errors
///
/// Returns `InvalidAddress` if the scheme is not supported.
pub fn validate_addr(remote: &str, addr: &str) -> Result<(), ConfigError> {
    if VALID_SCHEMES.iter().any(|s| addr.starts_with(s) && addr.len() > s.len()) {
        return Ok(());
    }
    Err(ConfigError::InvalidAddress {
        remote: remote.to_string(),
        addr: addr.to_string(),
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
