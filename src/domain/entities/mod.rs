//! Core data structures read and produced by the redirect pipeline.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - A stored slug → URL mapping, read-only from this service
//! - [`AccessRecord`] - One successful redirect, handed to the access log

pub mod access_record;
pub mod link;

pub use access_record::AccessRecord;
pub use link::LinkRecord;
