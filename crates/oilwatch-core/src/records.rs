use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted price observation: one supplier tier at one fetch instant.
///
/// Records are append-only — every successful fetch produces fresh rows and
/// history is retained, never overwritten. `price` is a decimal, not a float,
/// so repeated runs store and compare the exact advertised value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Fetch timestamp (not a page-advertised date).
    pub date: DateTime<Utc>,
    pub supplier_name: String,
    pub supplier_url: String,
    /// Minimum order size the price applies to, in gallons.
    pub gallons: i32,
    /// Price per gallon in USD.
    pub price: Decimal,
}
