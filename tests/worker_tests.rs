//! Worker loop dispatch: retry, dead-letter, and no-op paths.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;

use riskline::adapter::SqliteTradeStore;
use riskline::domain::Side;
use riskline::port::{PriceOracle, TradeStore, WorkQueue};
use riskline::testkit::db::memory_pool;
use riskline::testkit::domain::{raw_submission, submission};
use riskline::testkit::oracle::{FailingOracle, FlakyOracle, StaticOracle};
use riskline::testkit::queue::MemoryQueue;
use riskline::worker::{RetryPolicy, SkipReason, TickOutcome, TradeProcessor, Worker};

const IDLE: Duration = Duration::from_millis(10);

fn worker_with(
    store: Arc<SqliteTradeStore>,
    oracle: Arc<dyn PriceOracle>,
    queue: Arc<MemoryQueue>,
    max_attempts: u32,
) -> Worker {
    let processor = TradeProcessor::new(store, oracle);
    let policy = RetryPolicy::new(Duration::from_millis(1), max_attempts);
    Worker::new(queue, processor, policy, IDLE)
}

#[tokio::test]
async fn empty_queue_ticks_idle() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    let worker = worker_with(store, Arc::new(FailingOracle), queue, 3);

    assert_eq!(worker.tick().await.unwrap(), TickOutcome::Idle);
}

#[tokio::test]
async fn successful_delivery_commits() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    let oracle = Arc::new(StaticOracle::new(&[("AAPL", dec!(175.20))]));
    let trade = store
        .insert_trade(&submission("AAPL", Side::Buy, 10, dec!(170.00)))
        .await
        .unwrap();
    queue.enqueue(&trade.id.to_string()).await.unwrap();

    let worker = worker_with(store.clone(), oracle, queue.clone(), 3);
    assert_eq!(
        worker.tick().await.unwrap(),
        TickOutcome::Committed { trade_id: trade.id }
    );
    assert_eq!(queue.depth().await.unwrap(), 0);
    assert!(store.get_trade(trade.id).await.unwrap().unwrap().processed);
}

#[tokio::test]
async fn malformed_payload_is_dead_lettered() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    queue.enqueue("not-a-number").await.unwrap();

    let worker = worker_with(store, Arc::new(FailingOracle), queue.clone(), 3);
    let outcome = worker.tick().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Buried { ref payload, .. } if payload == "not-a-number"));

    let dead = queue.dead_letters().await.unwrap();
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].payload, "not-a-number");
    assert_eq!(queue.depth().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_side_is_dead_lettered_not_retried() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    let trade = store
        .insert_trade(&raw_submission("AAPL", "HOLD", 10, dec!(170.00)))
        .await
        .unwrap();
    queue.enqueue(&trade.id.to_string()).await.unwrap();

    let oracle = Arc::new(StaticOracle::new(&[("AAPL", dec!(175.20))]));
    let worker = worker_with(store, oracle, queue.clone(), 3);

    let outcome = worker.tick().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Buried { ref reason, .. } if reason.contains("unknown side")));
    assert_eq!(queue.depth().await.unwrap(), 0);
}

#[tokio::test]
async fn transient_failures_requeue_until_attempts_exhausted() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    let trade = store
        .insert_trade(&submission("AAPL", Side::Buy, 10, dec!(170.00)))
        .await
        .unwrap();
    queue.enqueue(&trade.id.to_string()).await.unwrap();

    let worker = worker_with(store, Arc::new(FailingOracle), queue.clone(), 3);

    assert!(matches!(
        worker.tick().await.unwrap(),
        TickOutcome::Requeued { attempts: 2, .. }
    ));
    assert!(matches!(
        worker.tick().await.unwrap(),
        TickOutcome::Requeued { attempts: 3, .. }
    ));
    let outcome = worker.tick().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Buried { ref reason, .. } if reason.contains("retries exhausted")));

    assert_eq!(queue.depth().await.unwrap(), 0);
    let dead = queue.dead_letters().await.unwrap();
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].attempts, 3);
}

#[tokio::test]
async fn retry_succeeds_once_the_oracle_recovers() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    let trade = store
        .insert_trade(&submission("AAPL", Side::Buy, 10, dec!(170.00)))
        .await
        .unwrap();
    queue.enqueue(&trade.id.to_string()).await.unwrap();

    let oracle = Arc::new(FlakyOracle::new(1, dec!(175.20)));
    let worker = worker_with(store.clone(), oracle, queue.clone(), 5);

    assert!(matches!(
        worker.tick().await.unwrap(),
        TickOutcome::Requeued { .. }
    ));
    assert_eq!(
        worker.tick().await.unwrap(),
        TickOutcome::Committed { trade_id: trade.id }
    );
    assert!(store.get_trade(trade.id).await.unwrap().unwrap().processed);
}

#[tokio::test]
async fn skips_never_requeue() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    queue.enqueue("424242").await.unwrap();

    let worker = worker_with(store, Arc::new(FailingOracle), queue.clone(), 3);
    assert_eq!(
        worker.tick().await.unwrap(),
        TickOutcome::Skipped {
            trade_id: 424242,
            reason: SkipReason::TradeNotFound
        }
    );
    assert_eq!(queue.depth().await.unwrap(), 0);
    assert!(queue.dead_letters().await.unwrap().is_empty());
}

#[tokio::test]
async fn requeue_failure_drops_the_delivery() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    let trade = store
        .insert_trade(&submission("AAPL", Side::Buy, 10, dec!(170.00)))
        .await
        .unwrap();
    queue.enqueue(&trade.id.to_string()).await.unwrap();
    queue.fail_requeue(true);

    let worker = worker_with(store, Arc::new(FailingOracle), queue.clone(), 3);
    let outcome = worker.tick().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Dropped { .. }));

    // Lost for this cycle: neither waiting nor dead-lettered.
    assert_eq!(queue.depth().await.unwrap(), 0);
    assert!(queue.dead_letters().await.unwrap().is_empty());
}

#[tokio::test]
async fn bury_failure_drops_the_delivery() {
    let store = Arc::new(SqliteTradeStore::new(memory_pool()));
    let queue = Arc::new(MemoryQueue::new());
    queue.enqueue("not-a-number").await.unwrap();
    queue.fail_bury(true);

    let worker = worker_with(store, Arc::new(FailingOracle), queue.clone(), 3);
    let outcome = worker.tick().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Dropped { ref payload } if payload == "not-a-number"));

    // Lost for this cycle: neither waiting nor dead-lettered.
    assert_eq!(queue.depth().await.unwrap(), 0);
    assert!(queue.dead_letters().await.unwrap().is_empty());
}

#[tokio::test]
async fn backoff_applies_only_to_failures() {
    assert!(!TickOutcome::Idle.needs_backoff());
    assert!(!TickOutcome::Committed { trade_id: 1 }.needs_backoff());
    assert!(!TickOutcome::Skipped {
        trade_id: 1,
        reason: SkipReason::AlreadyProcessed
    }
    .needs_backoff());
    assert!(TickOutcome::Requeued {
        payload: "1".into(),
        attempts: 2
    }
    .needs_backoff());
    assert!(TickOutcome::Buried {
        payload: "1".into(),
        reason: "x".into()
    }
    .needs_backoff());
    assert!(TickOutcome::Dropped { payload: "1".into() }.needs_backoff());
}
