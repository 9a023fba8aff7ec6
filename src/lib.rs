//! Riskline - trade booking, position and P&L engine.
//!
//! The core is an asynchronous trade-processing pipeline: booked trades
//! are enqueued by id, and a queue-driven worker fetches a current
//! price, computes the realized P&L delta, and atomically folds it into
//! a per-instrument position snapshot under at-least-once delivery.
//!
//! # Architecture
//!
//! Hexagonal: pure domain types with ports at the seams, adapters for
//! the real backends.
//!
//! - [`domain`] - Trades, position snapshots, the P&L ledger, and the
//!   finance math that ties them together
//! - [`port`] - `TradeStore`, `PriceOracle`, `WorkQueue` traits
//! - [`adapter`] - Diesel/sqlite store and durable queue, reqwest
//!   price-oracle client
//! - [`worker`] - The processing core: `TradeProcessor`, `Worker` loop,
//!   `RetryPolicy`
//! - [`cli`] - Subcommands for booking trades and inspecting state
//! - [`app`] - Service wiring built once at startup
//! - [`config`] - Configuration loading from TOML files
//! - [`error`] - Error types for the crate
//!
//! # Processing guarantees
//!
//! At-least-once, not exactly-once: deliveries are removed from the
//! queue before processing completes, duplicates are absorbed by the
//! `processed` idempotency guard, and every mutation for one trade
//! commits in a single transaction. Transient failures requeue with a
//! fixed backoff until the attempt budget runs out, then dead-letter;
//! permanent failures dead-letter immediately.

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod worker;

#[cfg(feature = "testkit")]
pub mod testkit;
