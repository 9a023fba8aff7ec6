use std::fmt;

use rust_decimal::Decimal;

use crate::domain::Position;
use crate::error::Error;

/// What one processor invocation did. The worker loop branches on this
/// instead of catching generic errors.
#[derive(Debug)]
pub enum Outcome {
    /// All mutations committed atomically.
    Committed(CommitSummary),
    /// Nothing to do; not a failure and never requeued.
    Skipped(SkipReason),
}

/// Details of a committed trade, for logging and tests.
#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub trade_id: i64,
    pub instrument: String,
    pub pnl: Decimal,
    pub position: Position,
}

/// Why a delivery was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The trade id does not exist in the store.
    TradeNotFound,
    /// The trade was already processed; the idempotency guard held.
    AlreadyProcessed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TradeNotFound => f.write_str("trade not found"),
            SkipReason::AlreadyProcessed => f.write_str("already processed"),
        }
    }
}

/// A failed processor invocation, split by retryability.
#[derive(Debug)]
pub enum Failure {
    /// May succeed on a later delivery: oracle or store unavailable.
    Transient(Error),
    /// Will fail identically every time: unknown side, bad stored data,
    /// malformed payload. Goes straight to the dead-letter store.
    Permanent(Error),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Transient(err) => write!(f, "transient: {err}"),
            Failure::Permanent(err) => write!(f, "permanent: {err}"),
        }
    }
}
