//! Tiered-list pages: repeated lines of the form
//! `"<qty> gallons or more- $<price> per gallon"`, one offer per element.

use oilwatch_core::SupplierConfig;
use regex::Regex;
use scraper::Html;

use super::{element_texts, parse_money};
use crate::types::{Extraction, PriceQuote};

pub(super) fn extract(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    let pattern =
        Regex::new(r"(\d+) gallons or more-\s*\$([\d.]+) per gallon").expect("valid regex");

    let mut extraction = Extraction::default();
    for text in element_texts(doc, supplier) {
        let Some(caps) = pattern.captures(&text) else {
            continue;
        };
        let gallons = caps[1].parse::<u32>().ok();
        let price = parse_money(&caps[2]);
        if let Some(quote) = gallons
            .zip(price)
            .and_then(|(g, p)| PriceQuote::checked(g, p))
        {
            extraction.quotes.push(quote);
        }
    }
    extraction
}
