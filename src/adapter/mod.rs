//! Adapters implementing the ports against real backends: sqlite
//! persistence and queue tables via Diesel, HTTP price oracle via
//! reqwest.

pub mod db;

mod codec;
mod oracle;
mod queue;
mod store;

pub use oracle::HttpPriceOracle;
pub use queue::SqliteWorkQueue;
pub use store::SqliteTradeStore;
