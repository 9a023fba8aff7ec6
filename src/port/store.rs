use async_trait::async_trait;

use crate::domain::{NewTrade, PnlRecord, Position, ProcessedFill, Trade};
use crate::error::Result;

/// Result of attempting to commit a processed trade.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// All mutations committed; carries the position snapshot after the fold.
    Committed(Position),
    /// The processed flag was already set when the transaction re-checked it.
    AlreadyProcessed,
    /// The trade row vanished between the read and the transaction.
    TradeMissing,
}

/// Persistence operations for trades, positions, and the P&L ledger.
///
/// Implementations must be thread-safe (`Send + Sync`). All mutations
/// for one processed trade happen inside [`commit_fill`](Self::commit_fill)
/// as a single transaction.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Insert a new trade with `processed = false`. Returns the stored
    /// row with its assigned id.
    async fn insert_trade(&self, new: &NewTrade) -> Result<Trade>;

    /// Get a trade by id.
    async fn get_trade(&self, id: i64) -> Result<Option<Trade>>;

    /// List trades, newest first.
    async fn list_trades(&self, limit: i64) -> Result<Vec<Trade>>;

    /// Get the position snapshot for an instrument, if one exists.
    async fn get_position(&self, instrument: &str) -> Result<Option<Position>>;

    /// List all position snapshots, ordered by instrument.
    async fn list_positions(&self) -> Result<Vec<Position>>;

    /// List P&L ledger entries, newest first.
    async fn list_pnl(&self, limit: i64) -> Result<Vec<PnlRecord>>;

    /// Atomically commit one processed trade: re-check and flip the
    /// `processed` flag, fold the position snapshot (creating it lazily),
    /// and append the ledger entry. All-or-nothing.
    async fn commit_fill(&self, fill: &ProcessedFill) -> Result<CommitOutcome>;
}
