//! REST client for LXD remotes.
//!
//! `LxdClient` speaks the JSON protocol; a `Transport` moves the bytes,
//! either over HTTPS (`reqwest`) or over the local unix socket (`hyper`).

pub mod https;
#[cfg(unix)]
pub mod unix;

use reqwest::Method;

use lxd_api::{
    ContainerSource, ContainerStatePut, ContainersPost, Operation, OperationStatus, Response,
    ResponseType,
};

use crate::application::ports::{ClientError, RemoteClient};
use crate::domain::{CreateResponse, ImageSource, OperationHandle};

pub use https::HttpsTransport;
#[cfg(unix)]
pub use unix::UnixSocketTransport;

/// Status code and body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Moves one JSON request to a remote and returns the raw answer.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, ClientError>;
}

/// Either transport, picked from the remote's address scheme.
pub enum AnyTransport {
    Https(HttpsTransport),
    #[cfg(unix)]
    Unix(UnixSocketTransport),
}

impl Transport for AnyTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, ClientError> {
        match self {
            Self::Https(t) => t.request(method, path, body).await,
            #[cfg(unix)]
            Self::Unix(t) => t.request(method, path, body).await,
        }
    }
}

/// Client bound to one remote.
pub struct LxdClient<T: Transport> {
    transport: T,
}

impl<T: Transport> LxdClient<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ClientError> {
        tracing::debug!(%method, path, "request");
        let raw = self.transport.request(method, path, body.as_ref()).await?;
        tracing::debug!(status = raw.status, bytes = raw.body.len(), "response");
        decode(&raw)
    }
}

/// Parse a response envelope, turning error envelopes and error statuses
/// into `ClientError::Status`.
///
/// # Errors
///
/// Returns `Status` for error answers and `Decode` for unparsable bodies.
pub fn decode(raw: &RawResponse) -> Result<Response, ClientError> {
    let parsed: Result<Response, _> = serde_json::from_slice(&raw.body);
    match parsed {
        Ok(resp) if resp.is_error() => Err(ClientError::Status {
            code: if resp.error_code == 0 {
                raw.status
            } else {
                resp.error_code
            },
            message: resp.error,
        }),
        Ok(resp) if raw.status >= 400 => Err(ClientError::Status {
            code: raw.status,
            message: if resp.error.is_empty() {
                format!("server returned HTTP {}", raw.status)
            } else {
                resp.error
            },
        }),
        Ok(resp) => Ok(resp),
        Err(_) if raw.status >= 400 => Err(ClientError::Status {
            code: raw.status,
            message: String::from_utf8_lossy(&raw.body).trim().to_string(),
        }),
        Err(e) => Err(ClientError::Decode(e.to_string())),
    }
}

fn expect_async(resp: &Response) -> Result<(), ClientError> {
    if resp.kind != ResponseType::Async || resp.operation.is_empty() {
        return Err(ClientError::Decode(
            "expected a background operation".to_string(),
        ));
    }
    Ok(())
}

impl<T: Transport> RemoteClient for LxdClient<T> {
    async fn create(
        &self,
        name: Option<&str>,
        source: &ImageSource,
        profiles: Option<&[String]>,
    ) -> Result<CreateResponse, ClientError> {
        let body = ContainersPost {
            name: name.map(str::to_owned),
            profiles: profiles.map(<[String]>::to_vec),
            source: ContainerSource::image(&source.alias, source.server.as_deref()),
        };
        let body = serde_json::to_value(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        let resp = self
            .call(Method::POST, &lxd_api::containers_path(), Some(body))
            .await?;
        expect_async(&resp)?;
        Ok(CreateResponse {
            operation: OperationHandle::new(resp.operation),
            resources: resp.resources,
        })
    }

    async fn start(&self, name: &str) -> Result<OperationHandle, ClientError> {
        let body = serde_json::to_value(ContainerStatePut::start())
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        let resp = self
            .call(Method::PUT, &lxd_api::container_state_path(name), Some(body))
            .await?;
        expect_async(&resp)?;
        Ok(OperationHandle::new(resp.operation))
    }

    async fn wait_for_success(&self, operation: &OperationHandle) -> Result<(), ClientError> {
        let path = lxd_api::operation::wait_path(operation.as_str());
        loop {
            let resp = self.call(Method::GET, &path, None).await?;
            let op: Operation = serde_json::from_value(resp.metadata)
                .map_err(|e| ClientError::Decode(e.to_string()))?;
            match op.status {
                OperationStatus::Success => return Ok(()),
                OperationStatus::Failure | OperationStatus::Cancelled => {
                    let reason = if op.err.is_empty() {
                        format!("operation {operation} ended as {:?}", op.status)
                    } else {
                        op.err
                    };
                    return Err(ClientError::OperationFailed(reason));
                }
                OperationStatus::Pending | OperationStatus::Running | OperationStatus::Unknown => {
                    tracing::debug!(%operation, status = ?op.status, "operation still running");
                }
            }
        }
    }
}
