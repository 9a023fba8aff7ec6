//! Wiring: one explicit context object built at startup and passed by
//! reference into the worker and CLI commands. No ambient globals.

use std::sync::Arc;

use crate::adapter::db::{create_pool, run_migrations};
use crate::adapter::{HttpPriceOracle, SqliteTradeStore, SqliteWorkQueue};
use crate::config::Config;
use crate::error::Result;
use crate::port::{PriceOracle, TradeStore, WorkQueue};
use crate::worker::{RetryPolicy, TradeProcessor, Worker};

const POOL_SIZE: u32 = 5;

/// Shared service handles behind their ports.
pub struct Services {
    pub store: Arc<dyn TradeStore>,
    pub queue: Arc<dyn WorkQueue>,
    pub oracle: Arc<dyn PriceOracle>,
}

impl Services {
    /// Open the database (applying pending migrations) and construct
    /// the adapters. Failures here are fatal to the process.
    pub fn connect(config: &Config) -> Result<Self> {
        let pool = create_pool(&config.database.url, POOL_SIZE)?;
        run_migrations(&pool)?;

        let store = Arc::new(SqliteTradeStore::new(pool.clone()));
        let queue = Arc::new(SqliteWorkQueue::new(pool, config.poll_interval()));
        let oracle = Arc::new(HttpPriceOracle::new(
            config.oracle.base_url.clone(),
            config.oracle_timeout(),
        )?);

        Ok(Self {
            store,
            queue,
            oracle,
        })
    }

    /// Build the worker loop over these services.
    pub fn worker(&self, config: &Config) -> Worker {
        let processor = TradeProcessor::new(self.store.clone(), self.oracle.clone());
        let policy = RetryPolicy::new(config.backoff(), config.worker.max_attempts);
        Worker::new(self.queue.clone(), processor, policy, config.idle_timeout())
    }
}
