use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Latest position snapshot for one instrument.
///
/// A snapshot, not a ledger: `net_quantity` is the running sum of
/// `quantity * direction` over every trade folded in, with no
/// validation against a full trade history. The invariant
/// `exposure == abs(net_quantity) * last_price` holds after every
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub instrument: String,
    pub net_quantity: i64,
    pub last_price: Decimal,
    pub exposure: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    /// Zeroed snapshot, used when an instrument is seen for the first time.
    pub fn zeroed(instrument: &str) -> Self {
        Self {
            instrument: instrument.to_string(),
            net_quantity: 0,
            last_price: Decimal::ZERO,
            exposure: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    /// Fold one processed trade into the snapshot.
    pub fn apply_fill(&mut self, quantity: i64, direction: i64, current_price: Decimal) {
        self.net_quantity += quantity * direction;
        self.last_price = current_price;
        self.exposure = Decimal::from(self.net_quantity.abs()) * current_price;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fold_maintains_exposure_invariant() {
        let mut pos = Position::zeroed("AAPL");
        pos.apply_fill(10, 1, dec!(175.20));
        assert_eq!(pos.net_quantity, 10);
        assert_eq!(pos.last_price, dec!(175.20));
        assert_eq!(pos.exposure, dec!(1752.0));

        pos.apply_fill(4, -1, dec!(175.20));
        assert_eq!(pos.net_quantity, 6);
        assert_eq!(pos.exposure, dec!(1051.2));
    }

    #[test]
    fn short_positions_have_positive_exposure() {
        let mut pos = Position::zeroed("TSLA");
        pos.apply_fill(8, -1, dec!(248.10));
        assert_eq!(pos.net_quantity, -8);
        assert_eq!(pos.exposure, dec!(1984.80));
    }
}
