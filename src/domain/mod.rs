//! Exchange-agnostic domain types and finance math.
//!
//! Everything here is pure: no I/O, no clocks beyond timestamping,
//! no dependency on ports or adapters.

mod pnl;
mod position;
mod trade;

pub use pnl::{pnl, PnlRecord, ProcessedFill};
pub use position::Position;
pub use trade::{normalize_instrument, NewTrade, Side, Trade};

use thiserror::Error;

/// Validation errors for domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown side: {side}")]
    UnknownSide { side: String },

    #[error("instrument must be non-empty")]
    EmptyInstrument,

    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity { quantity: i64 },

    #[error("price must be positive, got {price}")]
    NonPositivePrice { price: rust_decimal::Decimal },

    #[error("malformed queue payload: {payload:?}")]
    MalformedPayload { payload: String },
}
