//! Per-supplier harvest pipeline: fetch → parse → extract → dedup.

use oilwatch_core::SupplierConfig;

use crate::client::{FetchOutcome, PageClient};
use crate::dedup::dedup_quotes;
use crate::error::ScrapeError;
use crate::extract::extract_prices;
use crate::parse;
use crate::types::{FetchValidators, SupplierPrices};

/// Result of harvesting one supplier.
#[derive(Debug)]
pub enum HarvestOutcome {
    /// The origin confirmed the page is unchanged; extraction was skipped and
    /// the caller's cached validators remain authoritative.
    NotModified,
    /// The page was fetched and extracted. `prices.quotes` may be empty —
    /// "zero tiers advertised this run" is a valid observation. `validators`
    /// carries the response's cache validators for suppliers that cache them.
    Harvested {
        prices: SupplierPrices,
        validators: FetchValidators,
    },
}

/// Fetch one supplier's page and extract its deduplicated price quotes.
///
/// `cached` holds the validators from the supplier's last full fetch; they are
/// only attached when the supplier opts in to conditional fetching, so
/// suppliers without reliable caching headers always take the full-fetch path.
///
/// Element-level extraction problems are logged here and never propagated —
/// only fetch-level failures produce an `Err`, and those abort just this
/// supplier's run.
///
/// # Errors
///
/// Returns [`ScrapeError`] when the page cannot be fetched (network failure,
/// rate limiting after retries, or an unexpected HTTP status).
pub async fn harvest_supplier(
    client: &PageClient,
    supplier: &SupplierConfig,
    cached: Option<&FetchValidators>,
) -> Result<HarvestOutcome, ScrapeError> {
    let validators = if supplier.conditional_fetch {
        cached.filter(|v| !v.is_empty())
    } else {
        None
    };

    let outcome = client.fetch_page(&supplier.url, validators).await?;

    let (html, validators) = match outcome {
        FetchOutcome::NotModified => {
            tracing::info!(supplier = %supplier.name, "page not modified — skipping extraction");
            return Ok(HarvestOutcome::NotModified);
        }
        FetchOutcome::Fetched { html, validators } => (html, validators),
    };

    let doc = parse::parse_document(&html);
    let extraction = extract_prices(&doc, supplier);

    for diagnostic in &extraction.diagnostics {
        tracing::warn!(
            supplier = %supplier.name,
            strategy = %supplier.strategy,
            %diagnostic,
            "element skipped during extraction"
        );
    }

    let quotes = dedup_quotes(extraction.quotes);
    if quotes.is_empty() {
        tracing::warn!(
            supplier = %supplier.name,
            strategy = %supplier.strategy,
            "no price tiers found — page structure may have changed"
        );
    }

    Ok(HarvestOutcome::Harvested {
        prices: SupplierPrices {
            quotes,
            supplier_name: supplier.name.clone(),
            supplier_url: supplier.url.clone(),
        },
        validators,
    })
}
