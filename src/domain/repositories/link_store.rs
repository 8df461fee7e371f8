//! Link store trait for slug lookups.

use crate::domain::entities::LinkRecord;
use async_trait::async_trait;

/// Key namespace for link records.
pub const LINK_KEY_PREFIX: &str = "link:";

/// Builds the store key for a slug (`link:<slug>`).
pub fn link_key(slug: &str) -> String {
    format!("{LINK_KEY_PREFIX}{slug}")
}

/// Errors raised by a link store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Malformed record at {key}: {reason}")]
    Decode { key: String, reason: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Per-lookup options forwarded to the store.
///
/// `cache_ttl_secs` is advisory caching metadata: the store decides how long
/// an answer may be reused. It is not a client-side deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    pub cache_ttl_secs: u64,
}

impl LookupOptions {
    pub fn with_cache_ttl(cache_ttl_secs: u64) -> Self {
        Self { cache_ttl_secs }
    }
}

/// Read-only key-value access to link records.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisLinkStore`] - Redis-backed store
/// - [`crate::infrastructure::store::MemoryLinkStore`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetches and decodes the record stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if the key exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend is unreachable or the stored
    /// value is not a valid link record. Callers do not retry.
    async fn get(
        &self,
        key: &str,
        options: LookupOptions,
    ) -> Result<Option<LinkRecord>, StoreError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}
