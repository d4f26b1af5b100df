//! Set-semantics deduplication over exact `(gallons, price)` equality.

use std::collections::HashSet;

use crate::types::PriceQuote;

/// Collapse duplicate quotes from one fetch, keeping first-seen order.
///
/// Suppliers often repeat the same offer in several page regions (banner plus
/// sidebar); within a single fetch those are one observation. Dedup is never
/// applied across historical records. The operation is idempotent.
#[must_use]
pub fn dedup_quotes(quotes: Vec<PriceQuote>) -> Vec<PriceQuote> {
    let mut seen = HashSet::with_capacity(quotes.len());
    quotes.into_iter().filter(|q| seen.insert(*q)).collect()
}
