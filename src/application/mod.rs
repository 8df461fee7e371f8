//! Application layer implementing the redirect pipeline.
//!
//! This layer orchestrates domain contracts: it validates slugs, drives the
//! store lookups, composes redirect targets, and renders QR codes. Handlers
//! consume it; it never touches HTTP types beyond the redirect status code.
//!
//! # Contents
//!
//! - [`policy::RedirectPolicy`] - Immutable per-process behaviour switches
//! - [`services::link_resolver::LinkResolver`] - Slug validation and lookup
//! - [`services::redirect_target`] - Redirect target composition
//! - [`services::qr_renderer::QrRenderer`] - SVG QR rendering

pub mod policy;
pub mod services;
