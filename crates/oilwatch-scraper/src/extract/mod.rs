//! Per-supplier extraction strategies.
//!
//! Each supplier publishes price information in a different shape — repeated
//! text lines, a storefront widget, a promo sentence, a multi-tier block, a
//! pricing-table widget, a running total — and real-world markup drifts
//! independently per supplier (wording changes, number-order swaps). So each
//! shape is a named, independently testable strategy sharing only the output
//! contract: a pure function of the parsed document producing an
//! [`Extraction`]. Strategies never mutate shared state; re-running one on
//! identical input yields identical output.

mod multi_tier;
mod pricing_table;
mod promo_blurb;
mod running_total;
mod storefront;
mod tier_list;

use oilwatch_core::{StrategyKind, SupplierConfig};
use rust_decimal::Decimal;
use scraper::Html;

use crate::parse;
use crate::types::Extraction;

/// Run the strategy bound to `supplier` against a parsed document.
///
/// A document where the selector finds nothing, or where no text matches the
/// strategy's pattern, produces an empty extraction — that legitimately means
/// "no tiers currently advertised", not an error.
#[must_use]
pub fn extract_prices(doc: &Html, supplier: &SupplierConfig) -> Extraction {
    match supplier.strategy {
        StrategyKind::TierList => tier_list::extract(doc, supplier),
        StrategyKind::StorefrontPriceFirst => storefront::extract_price_first(doc, supplier),
        StrategyKind::StorefrontQuantityFirst => storefront::extract_quantity_first(doc, supplier),
        StrategyKind::PromoBlurb => promo_blurb::extract(doc, supplier),
        StrategyKind::MultiTier => multi_tier::extract(doc, supplier),
        StrategyKind::PricingTable => pricing_table::extract(doc, supplier),
        StrategyKind::RunningTotal => running_total::extract(doc, supplier),
    }
}

/// Flattened text of every element matched by the supplier's class selector,
/// in document order. Shared by the text-pattern strategies.
fn element_texts(doc: &Html, supplier: &SupplierConfig) -> Vec<String> {
    let Some(classes) = supplier.selector.class.as_deref() else {
        return Vec::new();
    };
    parse::elements_by_class(doc, supplier.selector.tag.as_deref(), classes)
        .into_iter()
        .map(parse::text_of)
        .collect()
}

/// Parse a currency amount captured from page text. Thousands separators are
/// stripped; anything else non-numeric fails the parse.
fn parse_money(raw: &str) -> Option<Decimal> {
    raw.replace(',', "").parse().ok()
}

#[cfg(test)]
pub(crate) mod test_support {
    use oilwatch_core::{SelectorConfig, StrategyKind, SupplierConfig, DEFAULT_REFERENCE_GALLONS};

    /// A supplier bound to `strategy`, selecting elements by `class`.
    pub(crate) fn supplier(strategy: StrategyKind, class: &str) -> SupplierConfig {
        SupplierConfig {
            name: "Test Supplier".to_string(),
            url: "https://example.com/".to_string(),
            strategy,
            selector: SelectorConfig {
                class: Some(class.to_string()),
                ..SelectorConfig::default()
            },
            reference_gallons: DEFAULT_REFERENCE_GALLONS,
            conditional_fetch: false,
        }
    }
}
