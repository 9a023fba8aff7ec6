//! HTTP price oracle client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, OracleError, Result};
use crate::port::PriceOracle;

#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[allow(dead_code)]
    instrument: String,
    price: Decimal,
}

/// Price oracle backed by the pricing service's REST endpoint:
/// `GET {base_url}/price/{INSTRUMENT}`.
pub struct HttpPriceOracle {
    client: Client,
    base_url: String,
}

impl HttpPriceOracle {
    /// Build a client with a bounded per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn current_price(&self, instrument: &str) -> Result<Decimal> {
        let url = format!("{}/price/{}", self.base_url, instrument);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OracleError::Transport {
                instrument: instrument.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::Oracle(OracleError::UnknownInstrument {
                instrument: instrument.to_string(),
                status: status.as_u16(),
            }));
        }
        if !status.is_success() {
            return Err(Error::Oracle(OracleError::Status {
                instrument: instrument.to_string(),
                status: status.as_u16(),
            }));
        }

        let body: PriceResponse = response.json().await.map_err(|e| OracleError::Transport {
            instrument: instrument.to_string(),
            source: e,
        })?;

        debug!(instrument, price = %body.price, "Fetched current price");
        Ok(body.price)
    }
}
