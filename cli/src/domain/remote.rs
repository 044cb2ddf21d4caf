//! Address resolution for `[remote:]identifier` tokens.

/// A token split into its remote and local identifier.
///
/// An empty `remote` means "use the default remote".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteRef {
    pub remote: String,
    pub identifier: String,
}

impl RemoteRef {
    /// Returns `true` when the token named no remote.
    #[must_use]
    pub fn uses_default_remote(&self) -> bool {
        self.remote.is_empty()
    }
}

/// Split a raw token on its first `:`.
///
/// Without a separator the whole token is the identifier. The remote name is
/// not checked against the configuration here.
#[must_use]
pub fn parse_remote_and_container(raw: &str) -> RemoteRef {
    match raw.split_once(':') {
        Some((remote, identifier)) => RemoteRef {
            remote: remote.to_string(),
            identifier: identifier.to_string(),
        },
        None => RemoteRef {
            remote: String::new(),
            identifier: raw.to_string(),
        },
    }
}
