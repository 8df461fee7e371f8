//! Domain layer containing the link model and collaborator contracts.
//!
//! Nothing in here knows about Redis, Axum, or the `qrcode` crate. The
//! infrastructure layer implements the traits declared here and the
//! application layer consumes them.
//!
//! # Architecture
//!
//! - [`entities`] - Link records and access-log records
//! - [`repositories`] - Link store and access-log traits
//! - [`qr_matrix`] - QR module matrix and the encoder contract
//! - [`access_worker`] - Background worker draining the access-log queue
//!
//! # Access Log Flow
//!
//! 1. Redirect handler resolves a slug
//! 2. An [`entities::AccessRecord`] is pushed onto a bounded channel
//! 3. [`access_worker::run_access_log_worker`] writes it to a sink with retries
//! 4. Failures are logged and counted, never surfaced to the client

pub mod access_worker;
pub mod entities;
pub mod qr_matrix;
pub mod repositories;
