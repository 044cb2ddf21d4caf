//! Infrastructure implementation of the `ClientConnector` port.

use crate::application::ports::{ClientConnector, ClientError};
use crate::domain::{ResolvedRemote, validate_addr};
#[cfg(unix)]
use crate::infra::lxd::UnixSocketTransport;
use crate::infra::lxd::{AnyTransport, HttpsTransport, LxdClient};

/// Builds `LxdClient`s, choosing the transport from the address scheme.
pub struct LxdConnector;

impl ClientConnector for LxdConnector {
    type Client = LxdClient<AnyTransport>;

    fn connect(&self, remote: &ResolvedRemote) -> Result<Self::Client, ClientError> {
        let addr = remote.endpoint.addr.as_str();
        validate_addr(&remote.name, addr).map_err(|e| ClientError::Transport(e.to_string()))?;

        let transport = if addr.starts_with("unix://") {
            unix_transport(addr)?
        } else {
            AnyTransport::Https(HttpsTransport::new(&remote.endpoint)?)
        };
        Ok(LxdClient::new(transport))
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn unix_transport(addr: &str) -> Result<AnyTransport, ClientError> {
    Ok(AnyTransport::Unix(UnixSocketTransport::new(addr)))
}

#[cfg(not(unix))]
fn unix_transport(addr: &str) -> Result<AnyTransport, ClientError> {
    Err(ClientError::Transport(format!(
        "{addr}: unix sockets are not supported on this platform"
    )))
}
