//! Configuration loading from the environment.

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` was set but did not parse as a TCP port.
    #[error("invalid PORT value `{value}`: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    /// An origin or the public URL did not parse as a URL.
    #[error("invalid {name} `{value}`: {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },

    /// A required value was empty.
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

/// Build the relay configuration from process environment variables.
///
/// Exactly two variables are consulted: `PORT` (listen port, default 3000)
/// and `APP_URL` (public base URL, default `http://localhost:<port>`).
pub fn from_env() -> Result<RelayConfig, ConfigError> {
    build(std::env::var("PORT").ok(), std::env::var("APP_URL").ok())
}

fn build(port: Option<String>, app_url: Option<String>) -> Result<RelayConfig, ConfigError> {
    let mut config = RelayConfig::default();

    if let Some(raw) = port {
        config.listener.port = raw.parse().map_err(|source| ConfigError::InvalidPort {
            value: raw.clone(),
            source,
        })?;
    }

    config.public_url =
        app_url.unwrap_or_else(|| format!("http://localhost:{}", config.listener.port));

    validate(&config)?;
    Ok(config)
}

fn validate(config: &RelayConfig) -> Result<(), ConfigError> {
    check_url("APP_URL", &config.public_url)?;
    check_url("video origin", &config.upstream.video_origin)?;
    check_url("CDN playlist origin", &config.upstream.cdn_playlist_origin)?;
    if let Some(base) = &config.upstream.cdn_stream_base {
        check_url("CDN stream base", base)?;
    }
    if config.upstream.cdn_domain.is_empty() {
        return Err(ConfigError::Empty { name: "CDN domain" });
    }
    Ok(())
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })?;
    Ok(())
}
