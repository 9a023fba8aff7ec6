use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

/// Instantaneous price lookup for an instrument symbol.
///
/// Callers pass a normalized (trimmed, uppercased, non-empty) symbol.
/// Any failure — timeout, transport, non-success response — is treated
/// as transient by the worker and retried via requeue.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn current_price(&self, instrument: &str) -> Result<Decimal>;
}
