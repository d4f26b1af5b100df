//! The `collect` command: fetch every configured supplier's page, extract
//! current prices, and store (and optionally relay) the results.
//!
//! Per-supplier failures are logged and skipped rather than propagated so a
//! single unreachable supplier does not abort the full run. The run only
//! fails outright when every supplier produced nothing.

mod runner;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use oilwatch_core::{AppConfig, SupplierConfig};
use oilwatch_relay::RelayClient;
use oilwatch_scraper::PageClient;

use runner::{process_supplier, SupplierOutcome};

/// Load the suppliers to process for a collect run.
///
/// If `supplier_filter` is `Some(slug)`, returns that single supplier and
/// errors if no configured supplier matches. If `None`, returns the whole
/// registry.
pub(crate) fn load_suppliers_for_collect(
    config: &AppConfig,
    supplier_filter: Option<&str>,
) -> anyhow::Result<Vec<SupplierConfig>> {
    let file = oilwatch_core::load_suppliers(&config.suppliers_path)?;
    select_suppliers(file.suppliers, supplier_filter)
}

fn select_suppliers(
    all: Vec<SupplierConfig>,
    supplier_filter: Option<&str>,
) -> anyhow::Result<Vec<SupplierConfig>> {
    match supplier_filter {
        Some(slug) => {
            let matched: Vec<SupplierConfig> =
                all.into_iter().filter(|s| s.slug() == slug).collect();
            if matched.is_empty() {
                anyhow::bail!("supplier '{slug}' not found; check config/suppliers.yaml");
            }
            Ok(matched)
        }
        None => Ok(all),
    }
}

/// Run a full collection pass over the configured suppliers.
///
/// When `dry_run` is `true` the function prints which suppliers would be
/// fetched and returns without touching the network or the database.
///
/// # Errors
///
/// Returns an error if the supplier filter resolves to nothing, the page
/// client cannot be constructed, the database is unreachable, or every
/// supplier failed to produce data. Per-supplier failures are logged and
/// skipped, not propagated.
pub(crate) async fn run_collect(
    config: &AppConfig,
    supplier_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let suppliers = load_suppliers_for_collect(config, supplier_filter)?;
    if suppliers.is_empty() {
        println!("no suppliers configured; nothing to collect");
        return Ok(());
    }

    if dry_run {
        let slugs: Vec<String> = suppliers.iter().map(SupplierConfig::slug).collect();
        println!(
            "dry-run: would collect prices from {} suppliers: [{}]",
            suppliers.len(),
            slugs.join(", ")
        );
        return Ok(());
    }

    let client = PageClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build page client: {e}"))?;

    let relay = match &config.ingest_url {
        Some(url) => Some(
            RelayClient::new(url, config.request_timeout_secs, config.relay_batch_size)
                .map_err(|e| anyhow::anyhow!("failed to build relay client: {e}"))?,
        ),
        None => None,
    };

    let pool_config = oilwatch_db::PoolConfig::from_app_config(config);
    let pool = oilwatch_db::connect_pool(&config.database_url, pool_config).await?;
    oilwatch_db::run_migrations(&pool).await?;

    // Ctrl-C lets in-flight suppliers finish; not-yet-started ones are skipped
    // so the process exits with complete, stored results for what already ran.
    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = Arc::clone(&cancelled);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received — finishing in-flight suppliers");
                cancelled.store(true, Ordering::SeqCst);
            }
        });
    }

    let summary = collect_suppliers(
        &pool,
        &client,
        relay.as_ref(),
        suppliers,
        config.max_concurrent_suppliers,
        &cancelled,
    )
    .await?;

    println!(
        "stored {} price records across {} suppliers \
         ({} unchanged, {} skipped, {} failed, {} relayed)",
        summary.records,
        summary.supplier_count - summary.skipped,
        summary.unchanged,
        summary.skipped,
        summary.failed,
        summary.relayed,
    );
    Ok(())
}

/// Aggregated tally for one collection pass.
#[derive(Debug)]
pub(super) struct RunSummary {
    supplier_count: usize,
    records: usize,
    relayed: usize,
    unchanged: usize,
    skipped: usize,
    failed: usize,
}

/// Run every supplier through the pipeline with bounded concurrency and
/// per-supplier failure isolation: a supplier that fails is logged and counted,
/// never propagated, so the rest still fetch and store.
///
/// # Errors
///
/// Fails only when every supplier failed to produce data — partial results are
/// a successful run.
async fn collect_suppliers(
    pool: &sqlx::PgPool,
    client: &PageClient,
    relay: Option<&RelayClient>,
    suppliers: Vec<SupplierConfig>,
    max_concurrent: usize,
    cancelled: &Arc<AtomicBool>,
) -> anyhow::Result<RunSummary> {
    let supplier_count = suppliers.len();

    let results: Vec<(SupplierConfig, SupplierOutcome)> = stream::iter(suppliers)
        .map(|supplier| {
            let cancelled = Arc::clone(cancelled);
            async move {
                if cancelled.load(Ordering::SeqCst) {
                    return (supplier, SupplierOutcome::Skipped);
                }
                let outcome = process_supplier(pool, client, relay, &supplier).await;
                (supplier, outcome)
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut summary = RunSummary {
        supplier_count,
        records: 0,
        relayed: 0,
        unchanged: 0,
        skipped: 0,
        failed: 0,
    };

    for (supplier, outcome) in &results {
        match outcome {
            SupplierOutcome::Harvested { records, relayed } => {
                summary.records += records;
                summary.relayed += relayed;
            }
            SupplierOutcome::NotModified => summary.unchanged += 1,
            SupplierOutcome::Skipped => summary.skipped += 1,
            SupplierOutcome::Failed(e) => {
                tracing::error!(
                    supplier = %supplier.name,
                    error = %e,
                    "supplier failed during collection"
                );
                summary.failed += 1;
            }
        }
    }

    if summary.failed > 0 {
        tracing::warn!(
            failed = summary.failed,
            total_suppliers = supplier_count,
            "some suppliers failed during collection"
        );
    }

    if supplier_count > 0 && summary.failed == supplier_count {
        anyhow::bail!("all {} suppliers failed collection", summary.failed);
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
