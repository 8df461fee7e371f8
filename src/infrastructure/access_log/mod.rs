//! Access logging for successful redirects.
//!
//! [`QueuedAccessLog`] is the request-facing side: it hands records to a
//! bounded channel without waiting on I/O. The worker in
//! [`crate::domain::access_worker`] drains the channel into one of the sinks:
//!
//! - [`TracingAccessSink`] - Structured `access_log` log lines
//! - [`RedisAccessSink`] - JSON entries appended to a Redis list

mod queued;
mod redis_sink;
mod tracing_sink;

pub use queued::QueuedAccessLog;
pub use redis_sink::RedisAccessSink;
pub use tracing_sink::TracingAccessSink;
