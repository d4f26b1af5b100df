//! Pricing-table widgets: outer containers with run-numbered classes, each
//! holding a title sub-element (`"300 Gallon Minimum"`) and a price
//! sub-element (`"$900.00"`).
//!
//! Tables above the reference tier advertise a bulk **total**, not a rate, so
//! the captured amount is divided by the quantity to normalize it into a
//! per-gallon price. That rule is page-specific business logic and rides on
//! the supplier's `reference_gallons`, not a universal default.
//!
//! Malformed cells (missing sub-elements, unparseable numbers) are collected
//! per element and excluded from the result; they never abort the supplier.

use oilwatch_core::SupplierConfig;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html};

use super::parse_money;
use crate::parse;
use crate::types::{Extraction, PriceQuote};

pub(super) fn extract(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    let mut extraction = Extraction::default();

    let sel = &supplier.selector;
    let (Some(prefix), Some(title_class), Some(price_class)) = (
        sel.class_prefix.as_deref(),
        sel.title_class.as_deref(),
        sel.price_class.as_deref(),
    ) else {
        // Registry validation rejects this at load time; guard anyway so a
        // hand-built config cannot panic the run.
        extraction
            .diagnostics
            .push("pricing-table selector is missing nested class configuration".to_string());
        return extraction;
    };

    for (index, el) in parse::elements_by_class_prefix(doc, prefix)
        .into_iter()
        .enumerate()
    {
        match extract_cell(el, title_class, price_class, supplier.reference_gallons) {
            Ok(quote) => extraction.quotes.push(quote),
            Err(reason) => extraction
                .diagnostics
                .push(format!("pricing table cell {index}: {reason}")),
        }
    }

    extraction
}

/// Extract one table cell, or explain why it was skipped.
fn extract_cell(
    el: ElementRef<'_>,
    title_class: &str,
    price_class: &str,
    reference_gallons: u32,
) -> Result<PriceQuote, String> {
    let quantity_pattern = Regex::new(r"(\d+)").expect("valid regex");
    // The leading `*` shows up on promotional strikethrough prices.
    let price_pattern = Regex::new(r"\$\*?([0-9.,]+)").expect("valid regex");

    let title = parse::first_descendant_by_class(el, title_class)
        .map(parse::text_of)
        .ok_or_else(|| format!("missing title element .{title_class}"))?;
    let price_text = parse::first_descendant_by_class(el, price_class)
        .map(parse::text_of)
        .ok_or_else(|| format!("missing price element .{price_class}"))?;

    let gallons = quantity_pattern
        .captures(&title)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .ok_or_else(|| format!("no quantity in title {title:?}"))?;

    let mut price = price_pattern
        .captures(&price_text)
        .and_then(|caps| parse_money(&caps[1]))
        .ok_or_else(|| format!("no price in {price_text:?}"))?;

    // Bulk tiers list a running total; normalize to a per-gallon rate.
    if gallons != reference_gallons {
        price = (price / Decimal::from(gallons)).round_dp(4);
    }

    PriceQuote::checked(gallons, price)
        .ok_or_else(|| format!("rejected quote ({gallons} gal at {price})"))
}
