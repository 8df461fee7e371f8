//! Channel-backed access log.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::entities::AccessRecord;
use crate::domain::repositories::{AccessLog, AccessLogError};

/// Access log that enqueues records for the background worker.
///
/// Writes never block: a full queue is reported as
/// [`AccessLogError::QueueFull`] and the record is dropped.
#[derive(Clone)]
pub struct QueuedAccessLog {
    tx: mpsc::Sender<AccessRecord>,
}

impl QueuedAccessLog {
    pub fn new(tx: mpsc::Sender<AccessRecord>) -> Self {
        Self { tx }
    }

    /// Creates the log together with the receiver the worker should drain.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AccessRecord>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Remaining free slots in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}

#[async_trait]
impl AccessLog for QueuedAccessLog {
    async fn write(&self, record: AccessRecord) -> Result<(), AccessLogError> {
        self.tx.try_send(record).map_err(|e| match e {
            TrySendError::Full(_) => AccessLogError::QueueFull,
            TrySendError::Closed(_) => AccessLogError::QueueClosed,
        })
    }

    fn health_check(&self) -> bool {
        !self.tx.is_closed()
    }

    fn free_slots(&self) -> Option<usize> {
        Some(self.capacity())
    }
}
