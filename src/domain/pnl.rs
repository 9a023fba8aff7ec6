use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{Side, Trade};

/// Realized P&L of one trade against the current market price:
/// `(current_price − trade_price) * quantity * direction`.
pub fn pnl(current_price: Decimal, trade_price: Decimal, quantity: i64, direction: i64) -> Decimal {
    (current_price - trade_price) * Decimal::from(quantity) * Decimal::from(direction)
}

/// Append-only P&L ledger entry, created exactly once per processed trade.
#[derive(Debug, Clone, PartialEq)]
pub struct PnlRecord {
    pub id: i64,
    pub trade_id: i64,
    pub instrument: String,
    pub direction: i64,
    pub quantity: i64,
    pub trade_price: Decimal,
    pub current_price: Decimal,
    pub pnl: Decimal,
    pub computed_at: DateTime<Utc>,
}

/// Everything the store needs to commit one processed trade atomically:
/// the flag flip, the position fold, and the ledger insert.
#[derive(Debug, Clone)]
pub struct ProcessedFill {
    pub trade_id: i64,
    pub instrument: String,
    pub direction: i64,
    pub quantity: i64,
    pub trade_price: Decimal,
    pub current_price: Decimal,
    pub pnl: Decimal,
}

impl ProcessedFill {
    pub fn compute(trade: &Trade, side: Side, instrument: String, current_price: Decimal) -> Self {
        let direction = side.direction();
        Self {
            trade_id: trade.id,
            instrument,
            direction,
            quantity: trade.quantity,
            trade_price: trade.price,
            current_price,
            pnl: pnl(current_price, trade.price, trade.quantity, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn buy_gains_when_price_rises() {
        assert_eq!(pnl(dec!(175.20), dec!(170.00), 10, 1), dec!(52.0));
    }

    #[test]
    fn sell_gains_when_price_falls() {
        assert_eq!(pnl(dec!(175.20), dec!(180.00), 4, -1), dec!(19.2));
    }

    #[test]
    fn zero_move_is_zero_pnl() {
        assert_eq!(pnl(dec!(100), dec!(100), 1000, 1), Decimal::ZERO);
    }
}
