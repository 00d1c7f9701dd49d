//! Iframe Relay
//!
//! An HTTP relay that sits between a browser player and a third-party video
//! host, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                  IFRAME RELAY                  │
//!                      │                                                │
//!    Client Request    │  ┌──────────┐   ┌─────────┐   ┌─────────────┐  │
//!    ──────────────────┼─▶│   cors   │──▶│  http   │──▶│ relay rule  │  │
//!                      │  │middleware│   │ server  │   │  handlers   │  │
//!                      │  └──────────┘   └─────────┘   └──────┬──────┘  │
//!                      │                                      │         │
//!                      │                                      ▼         │
//!                      │                              ┌─────────────┐   │      Video host
//!                      │                              │  upstream   │───┼───▶  and CDN
//!                      │                              │   client    │◀──┼───
//!                      │                              └──────┬──────┘   │
//!                      │                                     │          │
//!    Client Response   │  ┌───────────────────────────┐      │          │
//!    ◀─────────────────┼──│ reply transform           │◀─────┘          │
//!                      │  │ rewrite / sanitize / pipe │                 │
//!                      │  └───────────────────────────┘                 │
//!                      │                                                │
//!                      │  Cross-cutting: config (env), tracing, CORS    │
//!                      └────────────────────────────────────────────────┘
//! ```
//!
//! Every inbound request maps to exactly one outbound request. Playlist
//! replies get their CDN URLs rewritten to point back at the relay, play
//! pages are scrubbed of ad payloads and given a fetch interceptor, stream
//! bytes are piped through untouched.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iframe_relay::config;
use iframe_relay::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iframe_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("iframe-relay v0.1.0 starting");

    // Load configuration from the environment
    let config = config::from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        public_url = %config.public_url,
        video_origin = %config.upstream.video_origin,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
