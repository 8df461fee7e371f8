//! # Link Redirector
//!
//! Short-link front end: resolves `/<slug>` against a key-value store and
//! answers with a redirect or, on `?showQR=true`, an SVG QR code of the
//! redirect target.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link and access records, store and access-log traits, QR matrix
//! - **Application Layer** ([`application`]) - Slug resolution, target building, SVG rendering
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores, access-log sinks, QR encoder
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Case-insensitive slug lookup with an original-case fallback
//! - Optional query propagation onto the target URL
//! - QR codes rendered as SVG with square finder patterns and round dots
//! - Asynchronous access logging with retry logic
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! redis-cli SET link:promo '{"url":"https://example.com/spring"}'
//!
//! cargo run
//! curl -i http://localhost:3000/promo
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::policy::RedirectPolicy;
    pub use crate::application::services::{LinkResolver, QrRenderer, Resolution};
    pub use crate::domain::entities::{AccessRecord, LinkRecord};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
