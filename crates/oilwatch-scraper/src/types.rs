//! Canonical extraction output types.

use rust_decimal::Decimal;

/// One tiered price offer: the advertised price per gallon at a minimum
/// order quantity.
///
/// Equality is exact on both fields — `price` is a [`Decimal`], never a
/// binary float, so `(100, 3.10)` extracted from two runs of the same page
/// compares equal and deduplication stays well-defined. Quotes are immutable
/// once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceQuote {
    /// Minimum order quantity in gallons. Always positive.
    pub gallons: u32,
    /// Price per gallon in USD. Always non-negative.
    pub price: Decimal,
}

impl PriceQuote {
    /// Build a quote, rejecting values that must never reach a sink:
    /// a zero quantity or a negative price.
    #[must_use]
    pub fn checked(gallons: u32, price: Decimal) -> Option<Self> {
        if gallons == 0 || price.is_sign_negative() {
            return None;
        }
        Some(Self { gallons, price })
    }
}

/// The result of extracting one parsed document: surviving quotes plus
/// per-element diagnostics. Malformed elements are collected here instead of
/// raised, so one broken table cell never takes down the supplier.
#[derive(Debug, Default)]
pub struct Extraction {
    pub quotes: Vec<PriceQuote>,
    pub diagnostics: Vec<String>,
}

/// Deduplicated quotes for one supplier fetch, tagged with the supplier
/// identity for the sinks.
#[derive(Debug, Clone)]
pub struct SupplierPrices {
    pub quotes: Vec<PriceQuote>,
    pub supplier_name: String,
    pub supplier_url: String,
}

/// Cache validators observed on the last full response for a supplier.
///
/// Sent back as `If-Modified-Since` / `If-None-Match` on the next fetch for
/// suppliers that opt in to conditional fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchValidators {
    pub last_modified: Option<String>,
    pub etag: Option<String>,
}

impl FetchValidators {
    /// `true` when neither validator is present — nothing worth caching.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_modified.is_none() && self.etag.is_none()
    }
}
