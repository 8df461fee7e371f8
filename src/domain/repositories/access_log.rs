//! Access-log contracts.

use crate::domain::entities::AccessRecord;
use async_trait::async_trait;

/// Errors that can occur while recording an access.
#[derive(Debug, thiserror::Error)]
pub enum AccessLogError {
    #[error("Access log queue is full")]
    QueueFull,

    #[error("Access log queue is closed")]
    QueueClosed,

    #[error("Access log sink error: {0}")]
    Sink(String),
}

/// Best-effort notification of a successful redirect.
///
/// The outcome is observed only for diagnostics. Callers log a failure and
/// carry on; it never changes the response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLog: Send + Sync {
    /// Records one access.
    async fn write(&self, record: AccessRecord) -> Result<(), AccessLogError>;

    /// Returns `true` while records can still be accepted.
    fn health_check(&self) -> bool;

    /// Free slots left before writes start failing, for bounded logs.
    fn free_slots(&self) -> Option<usize> {
        None
    }
}

/// Durable destination for access records.
///
/// # Implementations
///
/// - [`crate::infrastructure::access_log::TracingAccessSink`] - Structured log lines
/// - [`crate::infrastructure::access_log::RedisAccessSink`] - Redis list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogSink: Send + Sync {
    async fn persist(&self, record: &AccessRecord) -> Result<(), AccessLogError>;
}
