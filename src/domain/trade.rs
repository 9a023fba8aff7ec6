use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Order side. `direction()` is the signed multiplier used in
/// position aggregation and P&L math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// BUY → +1, SELL → −1.
    pub fn direction(self) -> i64 {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(DomainError::UnknownSide {
                side: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim, uppercase, and reject empty instrument symbols.
pub fn normalize_instrument(raw: &str) -> Result<String, DomainError> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(DomainError::EmptyInstrument);
    }
    Ok(normalized)
}

/// A booked trade. Immutable once created except for the `processed`
/// flag, which flips false→true exactly once on successful processing.
///
/// `side` is kept as the raw stored string and validated to [`Side`] at
/// processing time, so a bad value reaches the worker as an explicit
/// unknown-side error instead of a row-decode failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: i64,
    pub instrument: String,
    pub side: String,
    pub quantity: i64,
    pub price: Decimal,
    pub traded_at: DateTime<Utc>,
    pub processed: bool,
}

impl Trade {
    pub fn side(&self) -> Result<Side, DomainError> {
        self.side.parse()
    }
}

/// A trade submission before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewTrade {
    pub instrument: String,
    pub side: String,
    pub quantity: i64,
    pub price: Decimal,
}

impl NewTrade {
    /// Validate and normalize a submission.
    pub fn new(
        instrument: &str,
        side: Side,
        quantity: i64,
        price: Decimal,
    ) -> Result<Self, DomainError> {
        let instrument = normalize_instrument(instrument)?;
        if quantity <= 0 {
            return Err(DomainError::NonPositiveQuantity { quantity });
        }
        if price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }
        Ok(Self {
            instrument,
            side: side.as_str().to_string(),
            quantity,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" SELL ".parse::<Side>().unwrap(), Side::Sell);
    }

    #[test]
    fn side_rejects_unknown_values() {
        let err = "HOLD".parse::<Side>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownSide {
                side: "HOLD".to_string()
            }
        );
    }

    #[test]
    fn directions_are_signed() {
        assert_eq!(Side::Buy.direction(), 1);
        assert_eq!(Side::Sell.direction(), -1);
    }

    #[test]
    fn instrument_normalization() {
        assert_eq!(normalize_instrument(" aapl ").unwrap(), "AAPL");
        assert_eq!(
            normalize_instrument("   ").unwrap_err(),
            DomainError::EmptyInstrument
        );
    }

    #[test]
    fn new_trade_validates_quantity_and_price() {
        assert!(NewTrade::new("AAPL", Side::Buy, 0, dec!(170)).is_err());
        assert!(NewTrade::new("AAPL", Side::Buy, 10, dec!(0)).is_err());
        let trade = NewTrade::new("aapl", Side::Buy, 10, dec!(170)).unwrap();
        assert_eq!(trade.instrument, "AAPL");
        assert_eq!(trade.side, "BUY");
    }
}
