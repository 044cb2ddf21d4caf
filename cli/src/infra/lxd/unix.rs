//! Unix socket transport: HTTP/1.1 over the local daemon's socket via `hyper`.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::client::conn::http1;
use hyper::{Request, header};
use hyper_util::rt::TokioIo;
use reqwest::Method;
use tokio::net::UnixStream;

use super::{RawResponse, Transport};
use crate::application::ports::ClientError;

/// Talks to the local daemon over its unix socket.
///
/// Each request opens its own connection; nothing bounds how long an answer
/// may take, so operation waits block until the daemon replies.
pub struct UnixSocketTransport {
    socket: PathBuf,
}

impl UnixSocketTransport {
    /// `addr` is `unix:///path/to/socket`.
    #[must_use]
    pub fn new(addr: &str) -> Self {
        Self {
            socket: PathBuf::from(addr.trim_start_matches("unix://")),
        }
    }

    #[must_use]
    pub fn socket(&self) -> &Path {
        &self.socket
    }

    fn transport_error(&self, e: impl std::fmt::Display) -> ClientError {
        ClientError::Transport(format!("cannot reach {}: {e}", self.socket.display()))
    }
}

/// Build an origin-form request; the daemon ignores the host.
///
/// # Errors
///
/// Returns `Decode` if the body cannot be serialized or the path is not a
/// valid request target.
pub fn build_request(
    method: Method,
    path: &str,
    body: Option<&serde_json::Value>,
) -> Result<Request<Full<Bytes>>, ClientError> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::HOST, "lxd");
    let payload = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            serde_json::to_vec(body).map_err(|e| ClientError::Decode(e.to_string()))?
        }
        None => Vec::new(),
    };
    builder
        .body(Full::new(Bytes::from(payload)))
        .map_err(|e| ClientError::Decode(format!("bad request for {path}: {e}")))
}

impl Transport for UnixSocketTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, ClientError> {
        let request = build_request(method, path, body)?;

        let stream = UnixStream::connect(&self.socket)
            .await
            .map_err(|e| self.transport_error(e))?;
        let (mut sender, connection) = http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|e| self.transport_error(e))?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::debug!(error = %e, "unix socket connection closed");
            }
        });

        let response = sender
            .send_request(request)
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| self.transport_error(e))?
            .to_bytes();
        driver.abort();

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
