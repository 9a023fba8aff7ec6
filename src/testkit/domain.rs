//! Builders for trade submissions used across tests.

use rust_decimal::Decimal;

use crate::domain::{NewTrade, Side};

/// A validated submission.
pub fn submission(instrument: &str, side: Side, quantity: i64, price: Decimal) -> NewTrade {
    NewTrade::new(instrument, side, quantity, price).expect("valid submission")
}

/// A submission with an arbitrary raw side string, bypassing
/// validation. Used to stage rows the processor must reject.
pub fn raw_submission(instrument: &str, side: &str, quantity: i64, price: Decimal) -> NewTrade {
    NewTrade {
        instrument: instrument.to_string(),
        side: side.to_string(),
        quantity,
        price,
    }
}
