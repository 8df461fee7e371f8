//! Utility functions for path, query, and request handling.
//!
//! - [`path`] - Slug extraction from the request path
//! - [`query`] - Query parsing and composition onto link URLs
//! - [`client_info`] - Client metadata extraction from HTTP headers

pub mod client_info;
pub mod path;
pub mod query;
