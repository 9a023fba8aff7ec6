//! The asynchronous trade-processing core: a single-in-flight worker
//! loop that dequeues trade identifiers, runs them through the
//! [`TradeProcessor`], and requeues or dead-letters failures according
//! to the [`RetryPolicy`].

mod outcome;
mod processor;
mod retry;
mod runner;

pub use outcome::{CommitSummary, Failure, Outcome, SkipReason};
pub use processor::TradeProcessor;
pub use retry::{RetryPolicy, RetryStep};
pub use runner::{TickOutcome, Worker};
