//! Multi-tier paragraphs: one block listing every tier, e.g.
//!
//! ```text
//! 100 Gallons or more: $3.10
//! 150 Gallons or more: $2.99
//! 300 Gallons or more: $2.89
//! ```
//!
//! Unlike the single-offer shapes, every match inside an element counts —
//! taking only the first would drop all but the lowest tier.

use oilwatch_core::SupplierConfig;
use regex::Regex;
use scraper::Html;

use super::{element_texts, parse_money};
use crate::types::{Extraction, PriceQuote};

pub(super) fn extract(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    let pattern = Regex::new(r"(\d+) Gallons or more\s*:?\s*\$([\d.]+)").expect("valid regex");

    let mut extraction = Extraction::default();
    for text in element_texts(doc, supplier) {
        for caps in pattern.captures_iter(&text) {
            let gallons = caps[1].parse::<u32>().ok();
            let price = parse_money(&caps[2]);
            if let Some(quote) = gallons
                .zip(price)
                .and_then(|(g, p)| PriceQuote::checked(g, p))
            {
                extraction.quotes.push(quote);
            }
        }
    }
    extraction
}
