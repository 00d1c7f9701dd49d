//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → middleware/cors.rs (OPTIONS short-circuit, CORS stamping)
//!     → server.rs (Axum routing, one route per relay rule)
//!     → relay handlers (outbound request, reply transform)
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
