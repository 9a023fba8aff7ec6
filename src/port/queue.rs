use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// One dequeued item. `attempts` counts deliveries of this payload so
/// far, including the current one; the first delivery is attempt 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub payload: String,
    pub attempts: u32,
}

/// A payload parked after permanent failure or retry exhaustion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadLetter {
    pub payload: String,
    pub attempts: u32,
    pub reason: String,
    pub buried_at: DateTime<Utc>,
}

/// Durable FIFO work queue with at-least-once delivery.
///
/// Dequeue removes the item before processing completes, so a consumer
/// crash between dequeue and requeue loses that delivery. There is no
/// built-in deduplication; consumers must be idempotent.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Append a payload to the tail as a fresh delivery (attempt 1).
    async fn enqueue(&self, payload: &str) -> Result<()>;

    /// Blocking pop from the head with a bounded wait. Returns `None`
    /// when the queue stays empty for the full timeout; that is not an
    /// error.
    async fn dequeue_wait(&self, timeout: Duration) -> Result<Option<Delivery>>;

    /// Re-append a failed delivery to the tail with its attempt count
    /// incremented.
    async fn requeue(&self, delivery: &Delivery) -> Result<()>;

    /// Move a delivery to the dead-letter store instead of retrying it.
    async fn bury(&self, delivery: &Delivery, reason: &str) -> Result<()>;

    /// Number of items currently waiting.
    async fn depth(&self) -> Result<u64>;

    /// Dead letters, newest first.
    async fn dead_letters(&self) -> Result<Vec<DeadLetter>>;
}
