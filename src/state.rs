//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::policy::RedirectPolicy;
use crate::application::services::{LinkResolver, QrRenderer};
use crate::domain::qr_matrix::QrEncoder;
use crate::domain::repositories::{AccessLog, LinkStore};

/// Handler state. Cheap to clone: every field is reference-counted or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LinkResolver>,
    pub qr_renderer: Arc<QrRenderer>,
    pub access_log: Arc<dyn AccessLog>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the logged client IP.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services together from their collaborators.
    pub fn new(
        store: Option<Arc<dyn LinkStore>>,
        policy: RedirectPolicy,
        encoder: Arc<dyn QrEncoder>,
        access_log: Arc<dyn AccessLog>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            resolver: Arc::new(LinkResolver::new(store, Arc::new(policy))),
            qr_renderer: Arc::new(QrRenderer::new(encoder)),
            access_log,
            behind_proxy,
        }
    }

    pub fn policy(&self) -> &RedirectPolicy {
        self.resolver.policy()
    }
}
