use std::sync::Arc;

use tracing::{debug, info};

use super::outcome::{CommitSummary, Failure, Outcome, SkipReason};
use crate::domain::{normalize_instrument, ProcessedFill};
use crate::error::Error;
use crate::port::{CommitOutcome, PriceOracle, TradeStore};

/// The fetch-compute-mutate sequence for one trade identifier.
///
/// Idempotent against redelivery once a prior attempt's commit is
/// durable: the `processed` flag is checked here and re-checked inside
/// the store transaction. Concurrent duplicates across processes are
/// not mutually excluded; this engine assumes a single worker instance.
pub struct TradeProcessor {
    store: Arc<dyn TradeStore>,
    oracle: Arc<dyn PriceOracle>,
}

impl TradeProcessor {
    pub fn new(store: Arc<dyn TradeStore>, oracle: Arc<dyn PriceOracle>) -> Self {
        Self { store, oracle }
    }

    /// Process one trade id. Skips are successes; failures carry their
    /// retryability so the loop can branch without inspecting causes.
    pub async fn process(&self, trade_id: i64) -> Result<Outcome, Failure> {
        let trade = self
            .store
            .get_trade(trade_id)
            .await
            .map_err(Failure::Transient)?;

        let Some(trade) = trade else {
            info!(trade_id, "Trade not found, skipping");
            return Ok(Outcome::Skipped(SkipReason::TradeNotFound));
        };
        if trade.processed {
            info!(trade_id, "Trade already processed, skipping");
            return Ok(Outcome::Skipped(SkipReason::AlreadyProcessed));
        }

        let side = trade
            .side()
            .map_err(|e| Failure::Permanent(Error::Domain(e)))?;
        let instrument = normalize_instrument(&trade.instrument)
            .map_err(|e| Failure::Permanent(Error::Domain(e)))?;

        let current_price = self
            .oracle
            .current_price(&instrument)
            .await
            .map_err(Failure::Transient)?;

        let fill = ProcessedFill::compute(&trade, side, instrument, current_price);
        debug!(
            trade_id,
            instrument = %fill.instrument,
            current_price = %current_price,
            pnl = %fill.pnl,
            "Computed fill"
        );

        match self
            .store
            .commit_fill(&fill)
            .await
            .map_err(Failure::Transient)?
        {
            CommitOutcome::Committed(position) => Ok(Outcome::Committed(CommitSummary {
                trade_id,
                instrument: fill.instrument,
                pnl: fill.pnl,
                position,
            })),
            CommitOutcome::AlreadyProcessed => {
                info!(trade_id, "Concurrent commit detected, skipping");
                Ok(Outcome::Skipped(SkipReason::AlreadyProcessed))
            }
            CommitOutcome::TradeMissing => {
                info!(trade_id, "Trade vanished before commit, skipping");
                Ok(Outcome::Skipped(SkipReason::TradeNotFound))
            }
        }
    }
}
