//! Services of the redirect pipeline.

pub mod link_resolver;
pub mod qr_renderer;
pub mod redirect_target;

pub use link_resolver::{LinkResolver, Resolution, ResolvedLink};
pub use qr_renderer::QrRenderer;
