//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for link lookups, access logging, and QR encoding.
//!
//! # Modules
//!
//! - [`store`] - Link stores (Redis and in-memory)
//! - [`access_log`] - Queued access log and its sinks
//! - [`qr`] - QR encoder backed by the `qrcode` crate

pub mod access_log;
pub mod qr;
pub mod store;
