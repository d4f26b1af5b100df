//! Database operations for the `fuel_prices` table.

use chrono::{DateTime, Utc};
use oilwatch_core::PriceRecord;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `fuel_prices` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PriceRow {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub supplier_name: String,
    pub supplier_url: String,
    pub gallons: i32,
    pub price: Decimal,
}

/// Append one row per record. Writes are independent — there is no
/// multi-record transaction, so a failure mid-batch leaves earlier rows
/// committed (the store is append-only and tolerates partial batches).
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on the first failed insert.
pub async fn insert_price_records(
    pool: &PgPool,
    records: &[PriceRecord],
) -> Result<usize, DbError> {
    let mut written = 0usize;
    for record in records {
        sqlx::query(
            "INSERT INTO fuel_prices (date, supplier_name, supplier_url, gallons, price) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.date)
        .bind(&record.supplier_name)
        .bind(&record.supplier_url)
        .bind(record.gallons)
        .bind(record.price)
        .execute(pool)
        .await?;
        written += 1;
    }
    Ok(written)
}

/// Most recent records, newest first, optionally filtered to one supplier.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_prices(
    pool: &PgPool,
    limit: i64,
    supplier_name: Option<&str>,
) -> Result<Vec<PriceRow>, DbError> {
    let rows = match supplier_name {
        Some(name) => {
            sqlx::query_as::<_, PriceRow>(
                "SELECT id, date, supplier_name, supplier_url, gallons, price \
                 FROM fuel_prices WHERE supplier_name = $1 \
                 ORDER BY date DESC, id DESC LIMIT $2",
            )
            .bind(name)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, PriceRow>(
                "SELECT id, date, supplier_name, supplier_url, gallons, price \
                 FROM fuel_prices ORDER BY date DESC, id DESC LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}
