//! HTTPS transport backed by `reqwest`.

use std::time::Duration;

use reqwest::Method;

use super::{RawResponse, Transport};
use crate::application::ports::ClientError;
use crate::domain::RemoteEndpoint;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to a remote over `https://` or `http://`.
///
/// No overall request timeout is set: operation waits block until the
/// server answers.
pub struct HttpsTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpsTransport {
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new(endpoint: &RemoteEndpoint) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lxc/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .danger_accept_invalid_certs(endpoint.insecure)
            .build()
            .map_err(|e| ClientError::Transport(format!("building HTTP client: {e}")))?;
        Ok(Self {
            client,
            base: endpoint.addr.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl Transport for HttpsTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, ClientError> {
        let url = self.url(path);
        let mut req = self.client.request(method, &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{url}: {e}")))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(format!("{url}: {e}")))?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
