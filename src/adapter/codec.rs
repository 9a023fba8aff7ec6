//! TEXT encodings shared by the sqlite adapters: decimals via
//! `rust_decimal`, timestamps as RFC 3339.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

pub(super) fn decimal_to_text(value: Decimal) -> String {
    value.to_string()
}

pub(super) fn decimal_from_text(text: &str) -> Result<Decimal> {
    Decimal::from_str(text).map_err(|e| Error::Parse(e.to_string()))
}

pub(super) fn timestamp_to_text(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub(super) fn timestamp_from_text(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}
