//! Promo blurbs: a single marketing sentence of the form
//! `"Prices as low as $<price> per gallon for online orders of <qty> gallons
//! or more"`. One match expected; when the exact phrase is absent the page
//! currently advertises no tier and extraction degrades silently to nothing.

use oilwatch_core::SupplierConfig;
use regex::Regex;
use scraper::Html;

use super::{element_texts, parse_money};
use crate::types::{Extraction, PriceQuote};

pub(super) fn extract(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    let pattern = Regex::new(
        r"Prices as low as \$([\d.]+) per gallon for online orders of (\d+) gallons or more",
    )
    .expect("valid regex");

    let mut extraction = Extraction::default();
    for text in element_texts(doc, supplier) {
        let Some(caps) = pattern.captures(&text) else {
            continue;
        };
        let price = parse_money(&caps[1]);
        let gallons = caps[2].parse::<u32>().ok();
        if let Some(quote) = gallons
            .zip(price)
            .and_then(|(g, p)| PriceQuote::checked(g, p))
        {
            extraction.quotes.push(quote);
        }
    }
    extraction
}
