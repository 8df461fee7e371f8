//! Link record stored under `link:<slug>` in the key-value store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored short-link mapping.
///
/// Only `url` is interpreted by this service. Any other field written by the
/// management side (title, comment, timestamps, ...) is kept in `extra` so the
/// record round-trips without loss, but it never influences a redirect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinkRecord {
    /// Creates a record with no extra fields.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: Map::new(),
        }
    }
}
