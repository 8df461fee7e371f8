//! Access-log sink that emits structured log lines.

use async_trait::async_trait;
use tracing::info;

use crate::domain::entities::AccessRecord;
use crate::domain::repositories::{AccessLogError, AccessLogSink};

/// Writes each access record as an `INFO` event on the `access_log` target.
///
/// Used when no Redis is configured. With `LOG_FORMAT=json` the events are
/// machine-readable and can be shipped by the log collector.
#[derive(Debug, Default)]
pub struct TracingAccessSink;

impl TracingAccessSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccessLogSink for TracingAccessSink {
    async fn persist(&self, record: &AccessRecord) -> Result<(), AccessLogError> {
        info!(
            target: "access_log",
            slug = %record.slug,
            url = %record.url,
            ip = record.ip.as_deref().unwrap_or("-"),
            user_agent = record.user_agent.as_deref().unwrap_or("-"),
            referer = record.referer.as_deref().unwrap_or("-"),
            language = record.language.as_deref().unwrap_or("-"),
            accessed_at = %record.accessed_at.to_rfc3339(),
            "access"
        );
        Ok(())
    }
}
