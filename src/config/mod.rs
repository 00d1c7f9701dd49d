//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, APP_URL)
//!     → loader.rs (read + defaults + validation)
//!     → RelayConfig (immutable)
//!     → shared via Arc in the axum state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no file and no reload
//! - Upstream endpoints are fields with compiled-in defaults so tests can
//!   point the relay at mock servers without touching the environment

pub mod loader;
pub mod schema;

pub use loader::{from_env, ConfigError};
pub use schema::{ListenerConfig, RelayConfig, UpstreamConfig};
