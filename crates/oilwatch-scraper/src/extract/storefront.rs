//! Storefront title widgets: a price and a quantity in one text block,
//! e.g. `"$ 2.99 ... For 200 Gallons"`.
//!
//! Page revisions of this widget have swapped the group order between
//! price-first and quantity-first. Rather than one pattern loose enough to
//! match both (and mis-capture on ambiguous text), each ordering is its own
//! named strategy and a supplier is pinned to the ordering its page uses.

use oilwatch_core::SupplierConfig;
use regex::Regex;
use scraper::Html;

use super::{element_texts, parse_money};
use crate::types::{Extraction, PriceQuote};

/// `"$ <price> ... For <qty> Gallons"` — price group precedes quantity.
pub(super) fn extract_price_first(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    let pattern = Regex::new(r"(?s)\$ ?([\d.]+).*?For (\d+) Gallons").expect("valid regex");

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

/// `"For <qty> Gallons ... $ <price>"` — quantity group precedes price.
pub(super) fn extract_quantity_first(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    let pattern = Regex::new(r"(?s)For (\d+) Gallons.*?\$ ?([\d.]+)").expect("valid regex");

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

#[cfg(test)]
mod tests {
    use super::super::test_support::supplier;
    use super::*;
    use oilwatch_core::StrategyKind;

    fn quote(gallons: u32, price: &str) -> PriceQuote {
        PriceQuote::checked(gallons, price.parse().unwrap()).unwrap()
    }

    #[test]
    fn price_first_ordering() {
        let doc = Html::parse_document(
            r#"<h2 class="wsite-content-title">$ 2.99 Cash Price For 200 Gallons</h2>"#,
        );
        let result =
            extract_price_first(&doc, &supplier(StrategyKind::StorefrontPriceFirst, "wsite-content-title"));
        assert_eq!(result.quotes, vec![quote(200, "2.99")]);
    }

    #[test]
    fn price_first_spans_line_breaks() {
        let doc = Html::parse_document(
            "<h2 class=\"wsite-content-title\">$ 3.15\nToday Only\nFor 150 Gallons</h2>",
        );
        let result =
            extract_price_first(&doc, &supplier(StrategyKind::StorefrontPriceFirst, "wsite-content-title"));
        assert_eq!(result.quotes, vec![quote(150, "3.15")]);
    }

    #[test]
    fn quantity_first_ordering() {
        let doc = Html::parse_document(
            r#"<h2 class="wsite-content-title">For 150 Gallons or more — $ 3.05</h2>"#,
        );
        let result = extract_quantity_first(
            &doc,
            &supplier(StrategyKind::StorefrontQuantityFirst, "wsite-content-title"),
        );
        assert_eq!(result.quotes, vec![quote(150, "3.05")]);
    }

    #[test]
    fn price_first_does_not_match_swapped_page() {
        // A quantity-first page must produce nothing under the price-first
        // strategy instead of mis-capturing groups.
        let doc = Html::parse_document(
            r#"<h2 class="wsite-content-title">For 150 Gallons call us</h2>"#,
        );
        let result =
            extract_price_first(&doc, &supplier(StrategyKind::StorefrontPriceFirst, "wsite-content-title"));
        assert!(result.quotes.is_empty());
    }
}
