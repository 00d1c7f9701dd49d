//! Relay core: rule handlers, target construction, outbound forwarding.
//!
//! # Data Flow
//!
//! ```text
//! inbound request
//!     │  routing picks the rule (handlers.rs)
//!     ▼
//! target.rs      inbound path → the one upstream URL
//! headers.rs     synthesized browser-session headers
//!     │
//!     ▼
//! client.rs      single outbound request, no retries
//!     │
//!     ▼
//! reply transform: rewrite.rs for playlists, sanitize for play pages,
//! byte piping for streams, content-type passthrough for the rest
//! ```

pub mod client;
pub mod error;
pub mod handlers;
pub mod headers;
pub mod rewrite;
pub mod target;

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::sanitize::InterceptorScript;

pub use client::UpstreamClient;
pub use error::{RelayResult, UpstreamError};
pub use rewrite::StreamRewriter;

/// Shared state handed to every handler.
///
/// Everything in here is immutable after startup and cheap to clone: the
/// config and compiled artifacts sit behind `Arc`, the client is its own
/// shared pool.
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<RelayConfig>,
    pub client: UpstreamClient,
    pub rewriter: Arc<StreamRewriter>,
    pub interceptor: Arc<InterceptorScript>,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Self {
        let rewriter = Arc::new(StreamRewriter::new(&config));
        let interceptor = Arc::new(InterceptorScript::new(&config));
        Self {
            config: Arc::new(config),
            client: UpstreamClient::new(),
            rewriter,
            interceptor,
        }
    }
}
