//! SQLite-backed durable work queue.
//!
//! FIFO over a `queue_items` table: enqueue appends a row, dequeue
//! transactionally pops the lowest id. The bounded wait is a poll loop,
//! so the queue survives process restarts without a broker.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tokio::time::Instant;

use super::codec::{timestamp_from_text, timestamp_to_text};
use super::db::model::{DeadLetterRow, NewDeadLetterRow, NewQueueItemRow, QueueItemRow};
use super::db::schema::{dead_letters, queue_items};
use super::db::{DbConn, DbPool};
use crate::error::{Error, Result};
use crate::port::{DeadLetter, Delivery, WorkQueue};

/// Durable FIFO queue over the store's sqlite database.
pub struct SqliteWorkQueue {
    pool: DbPool,
    poll_interval: Duration,
}

impl SqliteWorkQueue {
    pub fn new(pool: DbPool, poll_interval: Duration) -> Self {
        Self {
            pool,
            poll_interval,
        }
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    fn push(&self, payload: &str, attempts: u32) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(queue_items::table)
            .values(NewQueueItemRow {
                payload: payload.to_string(),
                attempts: i64::from(attempts),
                enqueued_at: timestamp_to_text(Utc::now()),
            })
            .execute(&mut conn)?;
        Ok(())
    }

    /// Pop the head item, removing it before the caller processes it.
    fn try_pop(&self) -> Result<Option<Delivery>> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let head: Option<QueueItemRow> = queue_items::table
                .order(queue_items::id.asc())
                .first(conn)
                .optional()?;
            let Some(row) = head else {
                return Ok(None);
            };
            diesel::delete(queue_items::table.find(row.id)).execute(conn)?;
            Ok(Some(Delivery {
                payload: row.payload,
                attempts: row.attempts.try_into().unwrap_or(u32::MAX),
            }))
        })
    }
}

#[async_trait]
impl WorkQueue for SqliteWorkQueue {
    async fn enqueue(&self, payload: &str) -> Result<()> {
        self.push(payload, 1)
    }

    async fn dequeue_wait(&self, timeout: Duration) -> Result<Option<Delivery>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(delivery) = self.try_pop()? {
                return Ok(Some(delivery));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            let wait = self.poll_interval.min(deadline - now);
            tokio::time::sleep(wait).await;
        }
    }

    async fn requeue(&self, delivery: &Delivery) -> Result<()> {
        self.push(&delivery.payload, delivery.attempts.saturating_add(1))
    }

    async fn bury(&self, delivery: &Delivery, reason: &str) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(dead_letters::table)
            .values(NewDeadLetterRow {
                payload: delivery.payload.clone(),
                attempts: i64::from(delivery.attempts),
                reason: reason.to_string(),
                buried_at: timestamp_to_text(Utc::now()),
            })
            .execute(&mut conn)?;
        Ok(())
    }

    async fn depth(&self) -> Result<u64> {
        let mut conn = self.conn()?;
        let count: i64 = queue_items::table.count().get_result(&mut conn)?;
        Ok(count.try_into().unwrap_or(0))
    }

    async fn dead_letters(&self) -> Result<Vec<DeadLetter>> {
        let mut conn = self.conn()?;
        let rows: Vec<DeadLetterRow> = dead_letters::table
            .order(dead_letters::id.desc())
            .load(&mut conn)?;
        rows.into_iter()
            .map(|row| {
                Ok(DeadLetter {
                    payload: row.payload,
                    attempts: row.attempts.try_into().unwrap_or(u32::MAX),
                    reason: row.reason,
                    buried_at: timestamp_from_text(&row.buried_at)?,
                })
            })
            .collect()
    }
}
