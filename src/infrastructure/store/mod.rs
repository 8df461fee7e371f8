//! Link store backends.
//!
//! Provides two [`crate::domain::repositories::LinkStore`] implementations:
//! - [`RedisLinkStore`] - Production Redis-backed store
//! - [`MemoryLinkStore`] - In-process map for local runs and tests
//!
//! [`LinkMemo`] holds the Redis store's read-through memo of hits.

mod memo;
mod memory_store;
mod redis_store;

pub use memo::{LinkMemo, MEMO_CAPACITY};
pub use memory_store::MemoryLinkStore;
pub use redis_store::RedisLinkStore;
