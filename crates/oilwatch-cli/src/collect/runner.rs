//! Per-supplier pipeline for a collect run: cached validators → fetch →
//! extract → store → relay → refresh validators.

use chrono::{DateTime, Utc};
use oilwatch_core::{PriceRecord, SupplierConfig};
use oilwatch_relay::RelayClient;
use oilwatch_scraper::{harvest_supplier, FetchValidators, HarvestOutcome, PageClient, SupplierPrices};

/// Outcome of processing a single supplier. `Failed` wraps fetch-level errors
/// and sink errors alike; the orchestrator only needs to know the supplier
/// produced nothing.
pub(super) enum SupplierOutcome {
    Harvested { records: usize, relayed: usize },
    NotModified,
    Skipped,
    Failed(anyhow::Error),
}

/// Run the full pipeline for one supplier.
///
/// Never returns `Err` — every failure mode is folded into
/// [`SupplierOutcome::Failed`] so the orchestrator's tally stays uniform.
pub(super) async fn process_supplier(
    pool: &sqlx::PgPool,
    client: &PageClient,
    relay: Option<&RelayClient>,
    supplier: &SupplierConfig,
) -> SupplierOutcome {
    match process_supplier_inner(pool, client, relay, supplier).await {
        Ok(outcome) => outcome,
        Err(e) => SupplierOutcome::Failed(e),
    }
}

async fn process_supplier_inner(
    pool: &sqlx::PgPool,
    client: &PageClient,
    relay: Option<&RelayClient>,
    supplier: &SupplierConfig,
) -> anyhow::Result<SupplierOutcome> {
    let cached = if supplier.conditional_fetch {
        oilwatch_db::get_fetch_cache(pool, &supplier.name)
            .await?
            .map(|row| FetchValidators {
                last_modified: row.last_modified,
                etag: row.etag,
            })
    } else {
        None
    };

    let outcome = harvest_supplier(client, supplier, cached.as_ref()).await?;

    let (prices, validators) = match outcome {
        HarvestOutcome::NotModified => return Ok(SupplierOutcome::NotModified),
        HarvestOutcome::Harvested { prices, validators } => (prices, validators),
    };

    let fetched_at = Utc::now();
    let records = records_from_prices(&prices, fetched_at);
    let written = oilwatch_db::insert_price_records(pool, &records).await?;

    let relayed = match relay {
        Some(relay) if !records.is_empty() => relay.relay_records(&records).await,
        _ => 0,
    };

    // Refresh validators only after the rows are safely stored, so a failed
    // write never leaves us believing we already hold this page's data.
    if supplier.conditional_fetch {
        oilwatch_db::upsert_fetch_cache(
            pool,
            &supplier.name,
            validators.last_modified.as_deref(),
            validators.etag.as_deref(),
            fetched_at,
        )
        .await?;
    }

    tracing::info!(
        supplier = %supplier.name,
        records = written,
        relayed,
        "supplier collected"
    );

    Ok(SupplierOutcome::Harvested {
        records: written,
        relayed,
    })
}

/// Stamp one fetch's quotes into persistable records, all sharing the same
/// fetch timestamp.
///
/// A quantity too large for the store's column is a garbage extraction, not a
/// real offer; such quotes are dropped with a warning rather than stored with
/// an invented value.
pub(super) fn records_from_prices(
    prices: &SupplierPrices,
    fetched_at: DateTime<Utc>,
) -> Vec<PriceRecord> {
    prices
        .quotes
        .iter()
        .filter_map(|quote| match i32::try_from(quote.gallons) {
            Ok(gallons) => Some(PriceRecord {
                date: fetched_at,
                supplier_name: prices.supplier_name.clone(),
                supplier_url: prices.supplier_url.clone(),
                gallons,
                price: quote.price,
            }),
            Err(_) => {
                tracing::warn!(
                    supplier = %prices.supplier_name,
                    gallons = quote.gallons,
                    "dropping quote with implausible quantity"
                );
                None
            }
        })
        .collect()
}
