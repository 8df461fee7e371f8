//! Redis-backed link store.

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, LookupOptions, StoreError, StoreResult};

use super::memo::LinkMemo;

/// Link store reading JSON records from Redis.
///
/// Each record lives under `link:<slug>` as a JSON string. Unlike a cache,
/// errors here are not swallowed: a failed `GET` fails the request.
///
/// The per-lookup cache-TTL hint is honoured with a [`LinkMemo`] of hits, so a
/// hot slug is served without a round trip for `cache_ttl_secs` seconds.
pub struct RedisLinkStore {
    client: ConnectionManager,
    memo: Mutex<LinkMemo>,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Link store connected to Redis");

        Ok(Self {
            client: manager,
            memo: Mutex::new(LinkMemo::new()),
        })
    }

    /// Returns a clone of the underlying connection for sharing with other
    /// Redis consumers (e.g. the access-log sink).
    pub fn connection(&self) -> ConnectionManager {
        self.client.clone()
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, key: &str, options: LookupOptions) -> StoreResult<Option<LinkRecord>> {
        let ttl = options.cache_ttl_secs;
        let memoised = self
            .memo
            .lock()
            .ok()
            .and_then(|memo| memo.get(key, ttl, Instant::now()));
        if let Some(record) = memoised {
            debug!("Memo HIT: {}", key);
            return Ok(Some(record));
        }

        let mut conn = self.client.clone();
        let raw = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| StoreError::Backend(format!("Redis GET {} failed: {}", key, e)))?;

        let Some(raw) = raw else {
            debug!("Store MISS: {}", key);
            return Ok(None);
        };

        let record: LinkRecord = serde_json::from_str(&raw).map_err(|e| StoreError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Store HIT: {} -> {}", key, record.url);

        if let Ok(mut memo) = self.memo.lock() {
            memo.put(key, Some(&record), ttl, Instant::now());
            debug!("Memo entries: {}", memo.len());
        }

        Ok(Some(record))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
