//! Play-page HTML scrubbing.
//!
//! # Data Flow
//!
//! ```text
//! upstream play-page HTML
//!     │
//!     ▼
//! ads::strip_ads           ordered removal passes, regex and literal
//!     │
//!     ▼
//! token::extract_csrf_token   first matching pattern wins, may be empty
//!     │
//!     ▼
//! inject::InterceptorScript   fetch interceptor before the first </head>
//! ```
//!
//! # Design Decisions
//!
//! - Pass order and pattern flags mirror the page structure the relay was
//!   built against; reordering passes changes what survives
//! - Config-dependent patterns are rendered once at startup; fixed patterns
//!   are lazily compiled statics

mod ads;
mod inject;
mod token;

pub use ads::strip_ads;
pub use inject::InterceptorScript;
pub use token::extract_csrf_token;
