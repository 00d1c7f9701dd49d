//! Request handlers, one per relay rule.
//!
//! # Responsibilities
//!
//! - Map each inbound request onto exactly one outbound upstream request
//! - Transform replies on the way back: playlist URL rewriting, play-page
//!   scrubbing and script injection, content-type passthrough
//!
//! # Design Decisions
//!
//! - Handlers return `Result<Response, UpstreamError>`; the error's
//!   `IntoResponse` impl is the single place failures become 500s
//! - Stream replies are piped, not buffered; everything else is small
//!   enough to hold in memory

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{
        header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, X_FRAME_OPTIONS},
        Method, Request, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};

use crate::relay::client::ensure_success;
use crate::relay::error::UpstreamError;
use crate::relay::{headers, target, RelayState};
use crate::sanitize;

/// Largest inbound body the catch-all will read before treating it as empty.
const PASSTHROUGH_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// GET `/` liveness probe.
pub async fn index() -> &'static str {
    "Simple iframe proxy server is running!"
}

/// POST `/playlist/{filename}`: forward to the video host and point the CDN
/// URLs in the reply back at this relay.
pub async fn playlist(
    State(state): State<RelayState>,
    Path(filename): Path<String>,
    inbound_headers: HeaderMap,
    body: Bytes,
) -> Result<Response, UpstreamError> {
    let url = target::playlist_url(&state.config.upstream, &filename);
    tracing::info!(target = %url, "Proxying playlist request");

    let caller_token = inbound_headers.get(headers::CSRF_HEADER);
    let outbound = headers::playlist(&state.config.upstream, caller_token);
    let body = forward_body(&inbound_headers, &body);

    let response = state
        .client
        .send(Method::POST, &url, outbound, Some(body))
        .await?;
    let response = ensure_success(response)?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("text/plain"));
    let text = response.text().await?;
    let rewritten = state.rewriter.rewrite(&text);
    tracing::debug!(
        bytes = rewritten.len(),
        rewrote = rewritten != text,
        "Playlist body ready"
    );

    Ok(([(CONTENT_TYPE, content_type)], rewritten.into_owned()).into_response())
}

/// `/stream` and `/stream/{*path}` (any method): resolve the CDN target and
/// pipe the reply bytes through without buffering.
///
/// A miss on a matched shape is an upstream failure like any other rule's;
/// only the guessed fallback target forwards the upstream status verbatim.
pub async fn stream(
    State(state): State<RelayState>,
    path: Option<Path<String>>,
) -> Result<Response, UpstreamError> {
    let stream_path = path.map(|Path(p)| p).unwrap_or_default();
    let target = target::stream_url(&state.config.upstream, &stream_path);
    tracing::info!(path = %stream_path, target = %target.url, "Proxying stream request");

    // Segment fetches go out as GET whatever the inbound method was.
    let outbound = headers::stream(&state.config.upstream);
    let response = state
        .client
        .send(Method::GET, &target.url, outbound, None)
        .await?;

    let status = response.status();
    if !status.is_success() {
        if target.matched {
            return Err(UpstreamError::Status(status));
        }
        tracing::warn!(status = %status, "Default stream target miss, forwarding status");
        return Ok(status.into_response());
    }

    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let mut out = Response::new(Body::from_stream(response.bytes_stream()));
    if let Some(content_type) = content_type {
        out.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(out)
}

/// GET `/iframe/{id}`: fetch the play page, scrub ad payloads, inject the
/// fetch interceptor and allow same-origin framing.
pub async fn iframe(
    State(state): State<RelayState>,
    Path(id): Path<String>,
) -> Result<Response, UpstreamError> {
    let url = target::play_page_url(&state.config.upstream, &id);
    tracing::info!(id = %id, target = %url, "Proxying play page");

    let response = state
        .client
        .send(Method::GET, &url, headers::play_page(), None)
        .await?;
    let response = ensure_success(response)?;
    let html = response.text().await?;

    let scrubbed = sanitize::strip_ads(&html);
    let token = sanitize::extract_csrf_token(&scrubbed);
    tracing::debug!(
        removed = html.len().saturating_sub(scrubbed.len()),
        token_found = !token.is_empty(),
        "Play page scrubbed"
    );
    let page = state.interceptor.inject(&scrubbed, &token);

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("text/html")),
            (X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        ],
        page,
    )
        .into_response())
}

/// POST `/jeyna-playlist/{filename}`: playlist initiation against the CDN
/// apex. The reply must parse as JSON and is re-serialized as such.
pub async fn playlist_initiation(
    State(state): State<RelayState>,
    Path(filename): Path<String>,
    inbound_headers: HeaderMap,
    body: Bytes,
) -> Result<Response, UpstreamError> {
    let url = target::playlist_initiation_url(&state.config.upstream, &filename);
    tracing::info!(target = %url, "Proxying playlist initiation");

    let outbound = headers::playlist_initiation(&state.config.upstream);
    let body = forward_body(&inbound_headers, &body);

    let response = state
        .client
        .send(Method::POST, &url, outbound, Some(body))
        .await?;
    let response = ensure_success(response)?;

    let raw = response.bytes().await?;
    let value: serde_json::Value = serde_json::from_slice(&raw)?;

    Ok(Json(value).into_response())
}

/// Fallback: proxy anything no other route claimed to the video host.
pub async fn passthrough(
    State(state): State<RelayState>,
    request: Request<Body>,
) -> Result<Response, UpstreamError> {
    let (parts, inbound_body) = request.into_parts();
    let path = parts.uri.path().to_string();

    // The dedicated stream routes own /stream/*; a request that still got
    // here has a path shape the router could not place.
    if path.starts_with("/stream/") {
        return Ok((
            StatusCode::NOT_FOUND,
            "Stream handler should have caught this request",
        )
            .into_response());
    }

    let url = target::passthrough_url(&state.config.upstream, &path, parts.uri.query());
    tracing::info!(method = %parts.method, target = %url, "Proxying passthrough request");

    let mut outbound = headers::passthrough(&state.config.upstream, parts.headers.get(ACCEPT));
    let body = if parts.method == Method::POST {
        let bytes = axum::body::to_bytes(inbound_body, PASSTHROUGH_BODY_LIMIT)
            .await
            .unwrap_or_default();
        outbound.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Some(forward_body(&parts.headers, &bytes))
    } else {
        None
    };

    let response = state.client.send(parts.method, &url, outbound, body).await?;
    let response = ensure_success(response)?;

    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let bytes = response.bytes().await?;
    let mut out = Response::new(Body::from(bytes));
    if let Some(content_type) = content_type {
        out.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(out)
}

/// Re-serialize an inbound body as the JSON text the upstream expects.
/// JSON bodies pass through re-encoded, urlencoded forms become flat JSON
/// objects, everything else collapses to `{}`.
fn forward_body(inbound_headers: &HeaderMap, body: &Bytes) -> String {
    parse_body(inbound_headers, body).to_string()
}

fn parse_body(inbound_headers: &HeaderMap, body: &Bytes) -> serde_json::Value {
    let content_type = inbound_headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/json") {
        if let Ok(value) = serde_json::from_slice(body) {
            return value;
        }
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let fields: serde_json::Map<String, serde_json::Value> = url::form_urlencoded::parse(body)
            .map(|(key, value)| {
                (
                    key.into_owned(),
                    serde_json::Value::String(value.into_owned()),
                )
            })
            .collect();
        if !fields.is_empty() {
            return serde_json::Value::Object(fields);
        }
    }
    serde_json::Value::Object(serde_json::Map::new())
}
