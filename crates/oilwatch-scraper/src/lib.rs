//! Supplier page fetching and price extraction.
//!
//! The pipeline per supplier is fetch → parse → extract → dedup, surfaced
//! through [`harvest_supplier`]. Extraction is a closed set of named
//! strategies (one per supplier page shape) that share a single output
//! contract: a sequence of [`PriceQuote`]s plus per-element diagnostics.

mod client;
mod dedup;
mod error;
pub mod extract;
mod harvest;
mod parse;
mod retry;
mod types;

pub use client::{FetchOutcome, PageClient};
pub use dedup::dedup_quotes;
pub use error::ScrapeError;
pub use harvest::{harvest_supplier, HarvestOutcome};
pub use types::{Extraction, FetchValidators, PriceQuote, SupplierPrices};
