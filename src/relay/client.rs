//! Outbound HTTP plumbing.

use axum::http::{HeaderMap, Method};

use crate::relay::error::{RelayResult, UpstreamError};

/// Thin wrapper over the shared connection pool.
///
/// One outbound request per inbound request, transport defaults only: no
/// retries, no added timeouts, redirects followed as the client library
/// ships them.
#[derive(Clone, Default)]
pub struct UpstreamClient {
    inner: reqwest::Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Send one outbound request. `body`, when present, is sent verbatim.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> RelayResult<reqwest::Response> {
        let mut request = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }
        Ok(request.send().await?)
    }
}

/// Convert a non-2xx reply into the upstream status error.
pub fn ensure_success(response: reqwest::Response) -> RelayResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(UpstreamError::Status(status))
    }
}
