//! Database operations for the `fetch_cache` validator table.
//!
//! The conditional-fetch cache is the only state that survives between
//! scheduled runs besides the price records themselves.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `fetch_cache` table: the validators observed on a
/// supplier's last full response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FetchCacheRow {
    pub supplier_name: String,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
    pub observed_at: DateTime<Utc>,
}

/// Current validators for a supplier, if any were ever recorded.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_fetch_cache(
    pool: &PgPool,
    supplier_name: &str,
) -> Result<Option<FetchCacheRow>, DbError> {
    let row = sqlx::query_as::<_, FetchCacheRow>(
        "SELECT supplier_name, last_modified, etag, observed_at \
         FROM fetch_cache WHERE supplier_name = $1",
    )
    .bind(supplier_name)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Record the validators from a fresh full response, replacing any prior
/// entry for the supplier.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_fetch_cache(
    pool: &PgPool,
    supplier_name: &str,
    last_modified: Option<&str>,
    etag: Option<&str>,
    observed_at: DateTime<Utc>,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO fetch_cache (supplier_name, last_modified, etag, observed_at) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (supplier_name) DO UPDATE \
         SET last_modified = EXCLUDED.last_modified, \
             etag = EXCLUDED.etag, \
             observed_at = EXCLUDED.observed_at",
    )
    .bind(supplier_name)
    .bind(last_modified)
    .bind(etag)
    .bind(observed_at)
    .execute(pool)
    .await?;
    Ok(())
}
