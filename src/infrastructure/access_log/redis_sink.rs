//! Access-log sink appending JSON records to a Redis list.

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tracing::debug;

use crate::domain::entities::AccessRecord;
use crate::domain::repositories::{AccessLogError, AccessLogSink};

/// Default list receiving access records.
pub const DEFAULT_ACCESS_LOG_KEY: &str = "access_log";

/// Appends every record (`RPUSH`) to a Redis list for downstream analytics.
pub struct RedisAccessSink {
    client: ConnectionManager,
    key: String,
}

impl RedisAccessSink {
    /// Wraps an existing connection; records go to [`DEFAULT_ACCESS_LOG_KEY`].
    pub fn new(client: ConnectionManager) -> Self {
        Self {
            client,
            key: DEFAULT_ACCESS_LOG_KEY.to_string(),
        }
    }
}

#[async_trait]
impl AccessLogSink for RedisAccessSink {
    async fn persist(&self, record: &AccessRecord) -> Result<(), AccessLogError> {
        let payload =
            serde_json::to_string(record).map_err(|e| AccessLogError::Sink(e.to_string()))?;

        let mut conn = self.client.clone();
        conn.rpush::<_, _, ()>(&self.key, payload)
            .await
            .map_err(|e| AccessLogError::Sink(format!("Redis RPUSH failed: {}", e)))?;

        debug!("Access record stored for {}", record.slug);
        Ok(())
    }
}
