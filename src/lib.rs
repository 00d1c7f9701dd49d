//! Ad-stripping iframe relay for a third-party video host.

pub mod config;
pub mod http;
pub mod relay;
pub mod sanitize;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use relay::RelayState;
