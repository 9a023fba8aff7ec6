//! Fake price oracles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{Error, OracleError, Result};
use crate::port::PriceOracle;

/// Serves a fixed price map; unknown instruments answer like the real
/// service's 404.
pub struct StaticOracle {
    prices: HashMap<String, Decimal>,
}

impl StaticOracle {
    pub fn new(prices: &[(&str, Decimal)]) -> Self {
        Self {
            prices: prices
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }
}

#[async_trait]
impl PriceOracle for StaticOracle {
    async fn current_price(&self, instrument: &str) -> Result<Decimal> {
        self.prices.get(instrument).copied().ok_or_else(|| {
            Error::Oracle(OracleError::UnknownInstrument {
                instrument: instrument.to_string(),
                status: 404,
            })
        })
    }
}

/// Fails a set number of lookups, then serves a fixed price.
pub struct FlakyOracle {
    failures_left: AtomicU32,
    price: Decimal,
}

impl FlakyOracle {
    pub fn new(failures: u32, price: Decimal) -> Self {
        Self {
            failures_left: AtomicU32::new(failures),
            price,
        }
    }
}

#[async_trait]
impl PriceOracle for FlakyOracle {
    async fn current_price(&self, _instrument: &str) -> Result<Decimal> {
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(Error::Connection("oracle unavailable".to_string()));
        }
        Ok(self.price)
    }
}

/// Never answers.
pub struct FailingOracle;

#[async_trait]
impl PriceOracle for FailingOracle {
    async fn current_price(&self, _instrument: &str) -> Result<Decimal> {
        Err(Error::Connection("oracle unavailable".to_string()))
    }
}
