//! Shared fakes and builders for integration tests.
//!
//! Enabled via the `testkit` feature, which the dev-dependency on this
//! crate turns on for the `tests/` suites.
//!
//! - [`db`] — in-memory sqlite pools with migrations applied.
//! - [`domain`] — builders for trade submissions, including invalid ones.
//! - [`oracle`] — fake [`PriceOracle`](crate::port::PriceOracle)
//!   implementations: `StaticOracle`, `FlakyOracle`, `FailingOracle`.
//! - [`queue`] — `MemoryQueue` with failure toggles for the requeue and
//!   bury paths.

pub mod db;
pub mod domain;
pub mod oracle;
pub mod queue;
