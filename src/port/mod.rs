//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams where the worker and CLI meet external
//! systems. Adapters implement them for the real backends; the
//! testkit provides in-memory fakes.
//!
//! - [`TradeStore`] — transactional persistence for trades, position
//!   snapshots, and the P&L ledger.
//! - [`PriceOracle`] — instantaneous price lookup for an instrument.
//! - [`WorkQueue`] — durable FIFO of trade identifiers with
//!   at-least-once delivery, attempt counting, and a dead-letter path.

mod oracle;
mod queue;
mod store;

pub use oracle::PriceOracle;
pub use queue::{DeadLetter, Delivery, WorkQueue};
pub use store::{CommitOutcome, TradeStore};
