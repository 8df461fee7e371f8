//! Collaborator contracts for the redirect pipeline.
//!
//! The key-value store and the access log are external systems. They are
//! reached only through the narrow traits defined here so any backend (or an
//! in-memory fake) can be substituted.
//!
//! # Available Traits
//!
//! - [`LinkStore`] - Keyed lookup of link records with a cache-TTL hint
//! - [`AccessLog`] - Best-effort notification of successful redirects
//! - [`AccessLogSink`] - Durable destination drained by the access-log worker
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod access_log;
pub mod link_store;

pub use access_log::{AccessLog, AccessLogError, AccessLogSink};
pub use link_store::{LinkStore, LookupOptions, StoreError, StoreResult, link_key};

#[cfg(test)]
pub use access_log::{MockAccessLog, MockAccessLogSink};
#[cfg(test)]
pub use link_store::MockLinkStore;
