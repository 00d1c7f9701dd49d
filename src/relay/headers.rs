//! Synthesized outbound header sets.
//!
//! The video host allow-lists requests by referer and origin and checks an
//! anti-forgery header on playlist calls. Every outbound request therefore
//! carries the headers a real browser session on the play page would have
//! produced, regardless of what the inbound request looked like.

use axum::http::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};

use crate::config::UpstreamConfig;

/// Browser identity presented on every outbound request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Anti-forgery token sent when the caller did not supply one.
pub const FALLBACK_CSRF_TOKEN: &str =
    "ubxcDBjFeZ+7Rdw569GgF4rzQPu7A8tScVTNygkzzvTPvYkJGP8Cv$CGB69IqtHI";

/// Play-page path the video host expects as the referer of playlist calls.
pub const PLAY_REFERER_PATH: &str = "/play/tt33034505";

/// Movie-listing site the video host accepts as an embedding referer.
pub const LISTING_REFERER: &str = "https://hdmovie2.gripe/";

/// Name of the anti-forgery header the playlist endpoint checks.
pub const CSRF_HEADER: &str = "x-csrf-token";

const ACCEPT_JSON_TEXT: &str = "application/json, text/plain, */*";
const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.9";

/// Headers for playlist forwarding. The caller's own token wins over the
/// fallback when the inbound request carried one.
pub fn playlist(upstream: &UpstreamConfig, caller_token: Option<&HeaderValue>) -> HeaderMap {
    let mut headers = form_post_headers(upstream);
    let token = caller_token
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_CSRF_TOKEN));
    headers.insert(CSRF_HEADER, token);
    headers
}

/// Headers for playlist initiation against the CDN. No anti-forgery token;
/// the CDN endpoint only checks the session headers.
pub fn playlist_initiation(upstream: &UpstreamConfig) -> HeaderMap {
    form_post_headers(upstream)
}

/// Headers for stream segment fetches.
pub fn stream(upstream: &UpstreamConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    if let Ok(referer) = HeaderValue::from_str(&format!("{}/", upstream.video_origin)) {
        headers.insert(REFERER, referer);
    }
    if let Ok(origin) = HeaderValue::from_str(&upstream.video_origin) {
        headers.insert(ORIGIN, origin);
    }
    headers
}

/// Headers for play-page fetches. These impersonate a navigation from the
/// movie-listing site, not an in-page API call, so there is no origin.
pub fn play_page() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_EN),
    );
    headers.insert(REFERER, HeaderValue::from_static(LISTING_REFERER));
    headers
}

/// Headers for the catch-all passthrough. The inbound accept header is
/// preserved so content negotiation still works end to end.
pub fn passthrough(upstream: &UpstreamConfig, inbound_accept: Option<&HeaderValue>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        inbound_accept
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("*/*")),
    );
    insert_session_identity(&mut headers, upstream);
    headers
}

fn form_post_headers(upstream: &UpstreamConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON_TEXT));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    insert_session_identity(&mut headers, upstream);
    headers
}

/// Referer and origin of a session sitting on the play page. Config URLs are
/// validated at startup, so conversion failures cannot happen in practice;
/// a failed insert just leaves the header off.
fn insert_session_identity(headers: &mut HeaderMap, upstream: &UpstreamConfig) {
    let referer = format!("{}{}", upstream.video_origin, PLAY_REFERER_PATH);
    if let Ok(value) = HeaderValue::from_str(&referer) {
        headers.insert(REFERER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&upstream.video_origin) {
        headers.insert(ORIGIN, value);
    }
}
