//! In-memory link store.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, LookupOptions, StoreError, StoreResult, link_key};

/// A link store backed by a `HashMap`.
///
/// Records are keyed exactly like the production store (`link:<slug>`), so
/// lookups see the same key space. The cache-TTL hint is ignored: every read
/// is served from memory.
///
/// # Use Cases
///
/// - Local development without Redis (seeded from `LINKS_FILE`)
/// - Integration tests
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    records: HashMap<String, LinkRecord>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `link:<slug>`, replacing any previous value.
    pub fn insert(&mut self, slug: &str, record: LinkRecord) {
        self.records.insert(link_key(slug), record);
    }

    /// Builder-style variant of [`Self::insert`].
    pub fn with_link(mut self, slug: &str, url: &str) -> Self {
        self.insert(slug, LinkRecord::new(url));
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parses a JSON object mapping slugs to link records.
    ///
    /// ```json
    /// { "promo": { "url": "https://example.com/spring" } }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if the document is not such an object.
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let links: HashMap<String, LinkRecord> =
            serde_json::from_str(json).map_err(|e| StoreError::Decode {
                key: "<document>".to_string(),
                reason: e.to_string(),
            })?;

        let mut store = Self::new();
        for (slug, record) in links {
            store.insert(&slug, record);
        }
        Ok(store)
    }

    /// Loads a store from a JSON file (see [`Self::from_json_str`]).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the file cannot be read, or
    /// [`StoreError::Decode`] if it is malformed.
    pub async fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::Connection(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let store = Self::from_json_str(&contents)?;
        info!("Loaded {} links from {}", store.len(), path.display());
        Ok(store)
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, key: &str, _options: LookupOptions) -> StoreResult<Option<LinkRecord>> {
        let record = self.records.get(key).cloned();
        debug!(key, hit = record.is_some(), "memory store lookup");
        Ok(record)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
