//! The `prices` command: print the most recently stored price records.

use oilwatch_core::AppConfig;

/// Print up to `limit` of the newest stored records, optionally restricted to
/// one supplier slug.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the query fails.
pub(crate) async fn run_prices(
    config: &AppConfig,
    supplier_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<()> {
    // The filter takes a slug on the command line but rows store the display
    // name, so resolve it against the registry first.
    let supplier_name = match supplier_filter {
        Some(slug) => {
            let file = oilwatch_core::load_suppliers(&config.suppliers_path)?;
            let supplier = file
                .suppliers
                .into_iter()
                .find(|s| s.slug() == slug)
                .ok_or_else(|| {
                    anyhow::anyhow!("supplier '{slug}' not found; check config/suppliers.yaml")
                })?;
            Some(supplier.name)
        }
        None => None,
    };

    let pool_config = oilwatch_db::PoolConfig::from_app_config(config);
    let pool = oilwatch_db::connect_pool(&config.database_url, pool_config).await?;
    oilwatch_db::run_migrations(&pool).await?;

    let rows = oilwatch_db::latest_prices(&pool, limit, supplier_name.as_deref()).await?;

    if rows.is_empty() {
        println!("no stored prices match");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{}  {:<30}  {:>5} gal  ${}",
            row.date.format("%Y-%m-%d %H:%M"),
            row.supplier_name,
            row.gallons,
            row.price
        );
    }

    Ok(())
}
