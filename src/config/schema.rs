//! Configuration schema definitions.
//!
//! The relay keeps its whole configuration in one plain struct, built once at
//! startup and shared read-only with every handler. There is no config file:
//! the environment supplies a port and a public URL, everything else is a
//! compiled-in default.

/// Root configuration for the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Listener configuration (port, bind address).
    pub listener: ListenerConfig,

    /// Base public URL of this relay (scheme + host, no trailing path).
    /// Substituted into rewritten CDN stream URLs so the player fetches
    /// segments back through us.
    pub public_url: String,

    /// Upstream endpoints the relay forwards to.
    pub upstream: UpstreamConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        let listener = ListenerConfig::default();
        let public_url = format!("http://localhost:{}", listener.port);
        Self {
            listener,
            public_url,
            upstream: UpstreamConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// Bind address for the listener, all interfaces.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Upstream endpoints.
///
/// Defaults point at the live third-party hosts; tests override them with
/// local mock servers.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Origin of the video host serving play pages and playlist metadata
    /// (e.g., "https://himer365ery.com").
    pub video_origin: String,

    /// Origin handling playlist-initiation requests on the CDN side.
    pub cdn_playlist_origin: String,

    /// Apex domain the CDN stream subdomains hang off. Also drives the
    /// rewrite pattern that points stream URLs back at the relay.
    pub cdn_domain: String,

    /// Scheme + host override for CDN stream targets. `None` derives
    /// `https://<subdomain>.<cdn_domain>`; tests set a local mock origin,
    /// which collapses every subdomain onto that one host.
    pub cdn_stream_base: Option<String>,
}

impl UpstreamConfig {
    /// Scheme + host for a stream fetch through `subdomain`.
    pub fn stream_base(&self, subdomain: &str) -> String {
        match &self.cdn_stream_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}", subdomain, self.cdn_domain),
        }
    }

    /// Host part of the video origin (scheme stripped, port kept).
    ///
    /// The injected fetch interceptor matches URLs by substring, the same way
    /// the upstream player scripts do, so it needs the bare host.
    pub fn video_host(&self) -> &str {
        self.video_origin
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            video_origin: "https://himer365ery.com".to_string(),
            cdn_playlist_origin: "https://jeyna376dip.com".to_string(),
            cdn_domain: "jeyna376dip.com".to_string(),
            cdn_stream_base: None,
        }
    }
}
