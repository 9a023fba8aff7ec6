use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::outcome::{Failure, Outcome, SkipReason};
use super::processor::TradeProcessor;
use super::retry::{RetryPolicy, RetryStep};
use crate::domain::DomainError;
use crate::error::Result;
use crate::port::{Delivery, WorkQueue};

/// What one loop iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The bounded dequeue wait elapsed with nothing to do.
    Idle,
    Committed { trade_id: i64 },
    Skipped { trade_id: i64, reason: SkipReason },
    Requeued { payload: String, attempts: u32 },
    Buried { payload: String, reason: String },
    /// The queue was unreachable while requeuing or burying; the
    /// delivery is lost for this cycle (best-effort degradation).
    Dropped { payload: String },
}

impl TickOutcome {
    /// Whether the loop should observe the retry backoff before the
    /// next iteration.
    pub fn needs_backoff(&self) -> bool {
        matches!(
            self,
            TickOutcome::Requeued { .. } | TickOutcome::Buried { .. } | TickOutcome::Dropped { .. }
        )
    }
}

/// Consume-process-acknowledge loop with exactly one in-flight delivery.
///
/// Dequeue removes the item before processing completes; a crash inside
/// a tick loses that delivery. This is the accepted at-least-once gap.
pub struct Worker {
    queue: Arc<dyn WorkQueue>,
    processor: TradeProcessor,
    policy: RetryPolicy,
    idle_timeout: Duration,
}

impl Worker {
    pub fn new(
        queue: Arc<dyn WorkQueue>,
        processor: TradeProcessor,
        policy: RetryPolicy,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            processor,
            policy,
            idle_timeout,
        }
    }

    /// Run until the surrounding task is cancelled. The process stops
    /// between iterations; there is no mid-flight cancellation.
    pub async fn run(&self) {
        info!(
            idle_timeout_secs = self.idle_timeout.as_secs(),
            backoff_secs = self.policy.backoff.as_secs(),
            max_attempts = self.policy.max_attempts,
            "Worker started"
        );

        loop {
            match self.tick().await {
                Ok(outcome) => {
                    if outcome.needs_backoff() {
                        tokio::time::sleep(self.policy.backoff).await;
                    }
                }
                Err(err) => {
                    error!(error = %err, "Dequeue failed");
                    tokio::time::sleep(self.policy.backoff).await;
                }
            }
        }
    }

    /// One iteration: bounded-wait dequeue, then dispatch. Exposed so
    /// tests can drive the loop deterministically.
    pub async fn tick(&self) -> Result<TickOutcome> {
        // The in-flight delivery is bound here, before any fallible
        // step, so failure handling always has it available.
        let Some(delivery) = self.queue.dequeue_wait(self.idle_timeout).await? else {
            return Ok(TickOutcome::Idle);
        };
        Ok(self.dispatch(delivery).await)
    }

    async fn dispatch(&self, delivery: Delivery) -> TickOutcome {
        let trade_id = match delivery.payload.trim().parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                let err = DomainError::MalformedPayload {
                    payload: delivery.payload.clone(),
                };
                warn!(payload = %delivery.payload, "Malformed queue payload");
                return self.bury(&delivery, &err.to_string()).await;
            }
        };

        match self.processor.process(trade_id).await {
            Ok(Outcome::Committed(summary)) => {
                info!(
                    trade_id,
                    instrument = %summary.instrument,
                    pnl = %summary.pnl,
                    net_quantity = summary.position.net_quantity,
                    exposure = %summary.position.exposure,
                    "Trade processed"
                );
                TickOutcome::Committed { trade_id }
            }
            Ok(Outcome::Skipped(reason)) => TickOutcome::Skipped { trade_id, reason },
            Err(Failure::Transient(err)) => {
                warn!(
                    trade_id,
                    attempts = delivery.attempts,
                    error = %err,
                    "Transient failure"
                );
                match self.policy.next_step(delivery.attempts) {
                    RetryStep::Requeue => self.requeue(&delivery).await,
                    RetryStep::Bury => {
                        self.bury(&delivery, &format!("retries exhausted: {err}"))
                            .await
                    }
                }
            }
            Err(Failure::Permanent(err)) => {
                warn!(trade_id, error = %err, "Permanent failure");
                self.bury(&delivery, &err.to_string()).await
            }
        }
    }

    async fn requeue(&self, delivery: &Delivery) -> TickOutcome {
        match self.queue.requeue(delivery).await {
            Ok(()) => TickOutcome::Requeued {
                payload: delivery.payload.clone(),
                attempts: delivery.attempts.saturating_add(1),
            },
            Err(err) => {
                error!(
                    payload = %delivery.payload,
                    error = %err,
                    "Requeue failed, delivery dropped"
                );
                TickOutcome::Dropped {
                    payload: delivery.payload.clone(),
                }
            }
        }
    }

    async fn bury(&self, delivery: &Delivery, reason: &str) -> TickOutcome {
        match self.queue.bury(delivery, reason).await {
            Ok(()) => TickOutcome::Buried {
                payload: delivery.payload.clone(),
                reason: reason.to_string(),
            },
            Err(err) => {
                error!(
                    payload = %delivery.payload,
                    error = %err,
                    "Bury failed, delivery dropped"
                );
                TickOutcome::Dropped {
                    payload: delivery.payload.clone(),
                }
            }
        }
    }
}
