//! In-memory work queue with failure toggles.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::{DeadLetter, Delivery, WorkQueue};

/// FIFO queue over a `VecDeque`. `dequeue_wait` returns immediately on
/// an empty queue so tests never sleep.
#[derive(Default)]
pub struct MemoryQueue {
    items: Mutex<VecDeque<Delivery>>,
    dead: Mutex<Vec<DeadLetter>>,
    fail_requeue: AtomicBool,
    fail_bury: AtomicBool,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `requeue` calls fail as if the queue were down.
    pub fn fail_requeue(&self, on: bool) {
        self.fail_requeue.store(on, Ordering::SeqCst);
    }

    /// Make subsequent `bury` calls fail as if the queue were down.
    pub fn fail_bury(&self, on: bool) {
        self.fail_bury.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl WorkQueue for MemoryQueue {
    async fn enqueue(&self, payload: &str) -> Result<()> {
        self.items.lock().push_back(Delivery {
            payload: payload.to_string(),
            attempts: 1,
        });
        Ok(())
    }

    async fn dequeue_wait(&self, _timeout: Duration) -> Result<Option<Delivery>> {
        Ok(self.items.lock().pop_front())
    }

    async fn requeue(&self, delivery: &Delivery) -> Result<()> {
        if self.fail_requeue.load(Ordering::SeqCst) {
            return Err(Error::Connection("queue unavailable".to_string()));
        }
        self.items.lock().push_back(Delivery {
            payload: delivery.payload.clone(),
            attempts: delivery.attempts.saturating_add(1),
        });
        Ok(())
    }

    async fn bury(&self, delivery: &Delivery, reason: &str) -> Result<()> {
        if self.fail_bury.load(Ordering::SeqCst) {
            return Err(Error::Connection("queue unavailable".to_string()));
        }
        self.dead.lock().push(DeadLetter {
            payload: delivery.payload.clone(),
            attempts: delivery.attempts,
            reason: reason.to_string(),
            buried_at: Utc::now(),
        });
        Ok(())
    }

    async fn depth(&self) -> Result<u64> {
        Ok(self.items.lock().len() as u64)
    }

    async fn dead_letters(&self) -> Result<Vec<DeadLetter>> {
        let mut dead = self.dead.lock().clone();
        dead.reverse();
        Ok(dead)
    }
}
