//! Running-total pages: an order-builder widget whose **last** element with
//! the configured class shows the current price — earlier occurrences are
//! intermediate line items, so only the final one counts. The value applies
//! to the supplier's reference quantity.
//!
//! There is no pattern to match — the element text after a leading currency
//! symbol is parsed directly. A value that fails to parse is reported as a
//! diagnostic and dropped; a price is never invented.

use oilwatch_core::SupplierConfig;
use rust_decimal::Decimal;
use scraper::Html;

use crate::parse;
use crate::types::{Extraction, PriceQuote};

pub(super) fn extract(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    let mut extraction = Extraction::default();

    let Some(classes) = supplier.selector.class.as_deref() else {
        return extraction;
    };

    let elements = parse::elements_by_class(doc, supplier.selector.tag.as_deref(), classes);
    let Some(last) = elements.last() else {
        // Selector matched nothing: the widget is gone or renamed. Degrade
        // to zero tiers rather than failing the supplier.
        return extraction;
    };

    let text = parse::text_of(*last);
    match parse_price(&text) {
        Some(price) => {
            if let Some(quote) = PriceQuote::checked(supplier.reference_gallons, price) {
                extraction.quotes.push(quote);
            }
        }
        None => extraction
            .diagnostics
            .push(format!("running total {text:?} is not a price")),
    }

    extraction
}

/// Parse `"$2.89"` (leading currency symbol optional) into a decimal.
fn parse_price(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let numeric = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    numeric.replace(',', "").parse().ok()
}
