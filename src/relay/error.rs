//! Relay error definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while relaying a request upstream.
///
/// There is exactly one failure mode per request: the single outbound call
/// either failed, answered non-2xx, or (playlist initiation only) produced a
/// body that was not JSON. All of them are terminal for that request.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The outbound call itself failed.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),

    /// Upstream body failed to parse as JSON.
    #[error("invalid JSON from upstream: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, UpstreamError>;

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Upstream request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {self}"),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_carries_bare_code() {
        let err = UpstreamError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }

    #[test]
    fn test_error_response_is_500_with_prefixed_body() {
        let response = UpstreamError::Status(StatusCode::BAD_GATEWAY).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
