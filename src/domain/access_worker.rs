//! Background worker that drains the access-log queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{error, info, warn};

use crate::domain::entities::AccessRecord;
use crate::domain::repositories::AccessLogSink;

/// Retries after the first failed write of a record.
const MAX_RETRIES: usize = 3;

/// Consumes access records until every sender is dropped.
///
/// Each record is written to `sink` with exponential backoff
/// (~100ms, 200ms, 400ms). A record that still fails is dropped and counted in
/// `access_log_failures_total`.
pub async fn run_access_log_worker(
    mut rx: mpsc::Receiver<AccessRecord>,
    sink: Arc<dyn AccessLogSink>,
) {
    info!("Access log worker started");

    while let Some(record) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .map(jitter)
            .take(MAX_RETRIES);

        let sink_ref = &sink;
        let record_ref = &record;
        let result = Retry::spawn(strategy, || async move {
            sink_ref.persist(record_ref).await.inspect_err(|e| {
                warn!(slug = %record_ref.slug, error = %e, "access log write attempt failed");
            })
        })
        .await;

        if let Err(e) = result {
            metrics::counter!("access_log_failures_total").increment(1);
            error!(slug = %record.slug, error = %e, "dropping access record");
        }
    }

    info!("Access log worker stopped");
}
