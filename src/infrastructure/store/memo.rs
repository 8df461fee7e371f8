//! In-process memo of link lookups, keyed by full store key.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::domain::entities::LinkRecord;

/// Upper bound on memoised hits before expired entries are swept.
pub const MEMO_CAPACITY: usize = 10_000;

struct MemoEntry {
    record: LinkRecord,
    expires_at: Instant,
}

/// Time-bounded memo of store hits.
///
/// Only found records are kept; a miss always goes back to the store. Every
/// call takes the TTL of the lookup and the current instant, so a TTL of zero
/// neither reads nor writes the memo.
///
/// When full, expired entries are swept first. If every entry is still live
/// the memo is cleared.
pub struct LinkMemo {
    entries: HashMap<String, MemoEntry>,
    capacity: usize,
}

impl LinkMemo {
    pub fn new() -> Self {
        Self::with_capacity(MEMO_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns the memoised record for `key` if it has not expired at `now`.
    pub fn get(&self, key: &str, ttl_secs: u64, now: Instant) -> Option<LinkRecord> {
        if ttl_secs == 0 {
            return None;
        }
        self.entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.record.clone())
    }

    /// Records the outcome of a store lookup. Misses are not stored.
    pub fn put(&mut self, key: &str, found: Option<&LinkRecord>, ttl_secs: u64, now: Instant) {
        let Some(record) = found else {
            return;
        };
        if ttl_secs == 0 {
            return;
        }

        if self.entries.len() >= self.capacity && !self.entries.contains_key(key) {
            self.entries.retain(|_, entry| entry.expires_at > now);
            if self.entries.len() >= self.capacity {
                self.entries.clear();
            }
        }

        self.entries.insert(
            key.to_string(),
            MemoEntry {
                record: record.clone(),
                expires_at: now + Duration::from_secs(ttl_secs),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LinkMemo {
    fn default() -> Self {
        Self::new()
    }
}
