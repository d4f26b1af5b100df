use super::*;

use chrono::{TimeZone, Utc};
use oilwatch_core::{SelectorConfig, StrategyKind};
use oilwatch_scraper::{PriceQuote, SupplierPrices};
use rust_decimal::Decimal;

fn supplier(name: &str) -> SupplierConfig {
    SupplierConfig {
        name: name.to_string(),
        url: "https://example.com/prices".to_string(),
        strategy: StrategyKind::TierList,
        selector: SelectorConfig {
            class: Some("kvtext".to_string()),
            ..SelectorConfig::default()
        },
        reference_gallons: 150,
        conditional_fetch: false,
    }
}

#[test]
fn select_suppliers_without_filter_returns_all() {
    let all = vec![supplier("Dan Bell Oil"), supplier("Oil Patch Fuel")];

    let selected = select_suppliers(all, None).expect("no filter should succeed");

    assert_eq!(selected.len(), 2);
}

#[test]
fn select_suppliers_by_slug_returns_single_match() {
    let all = vec![supplier("Dan Bell Oil"), supplier("Oil Patch Fuel")];

    let selected =
        select_suppliers(all, Some("oil-patch-fuel")).expect("known slug should succeed");

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].name, "Oil Patch Fuel");
}

#[test]
fn select_suppliers_unknown_slug_returns_error() {
    let all = vec![supplier("Dan Bell Oil")];

    let err = select_suppliers(all, Some("nonexistent")).expect_err("expected Err");
    let msg = format!("{err}");
    assert!(
        msg.contains("not found"),
        "error should mention 'not found', got: {msg}"
    );
}

#[test]
fn records_share_one_fetch_timestamp_and_supplier_identity() {
    let prices = SupplierPrices {
        quotes: vec![
            PriceQuote::checked(100, Decimal::new(310, 2)).unwrap(),
            PriceQuote::checked(150, Decimal::new(305, 2)).unwrap(),
        ],
        supplier_name: "Allstate Fuel Oil".to_string(),
        supplier_url: "https://example.com/prices".to_string(),
    };
    let fetched_at = Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 0).single().unwrap();

    let records = runner::records_from_prices(&prices, fetched_at);

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.date, fetched_at);
        assert_eq!(record.supplier_name, "Allstate Fuel Oil");
        assert_eq!(record.supplier_url, "https://example.com/prices");
    }
    assert_eq!(records[0].gallons, 100);
    assert_eq!(records[0].price, Decimal::new(310, 2));
    assert_eq!(records[1].gallons, 150);
}

#[test]
fn records_from_empty_quotes_is_empty() {
    let prices = SupplierPrices {
        quotes: vec![],
        supplier_name: "Dan Bell Oil".to_string(),
        supplier_url: "https://example.com/prices".to_string(),
    };

    let records = runner::records_from_prices(&prices, Utc::now());

    assert!(records.is_empty());
}

#[test]
fn implausible_quantity_is_dropped_not_clamped() {
    let prices = SupplierPrices {
        quotes: vec![
            PriceQuote::checked(u32::MAX, Decimal::new(289, 2)).unwrap(),
            PriceQuote::checked(150, Decimal::new(289, 2)).unwrap(),
        ],
        supplier_name: "Dan Bell Oil".to_string(),
        supplier_url: "https://example.com/prices".to_string(),
    };

    let records = runner::records_from_prices(&prices, Utc::now());

    assert_eq!(records.len(), 1, "oversized quantity must not be stored");
    assert_eq!(records[0].gallons, 150);
}

// ---------------------------------------------------------------------------
// Orchestration against a live database
// ---------------------------------------------------------------------------

use oilwatch_scraper::PageClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> PageClient {
    PageClient::new(5, "oilwatch-test/0.1", 0, 0).expect("failed to build test PageClient")
}

fn no_cancel() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

async fn mock_supplier_page(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

async fn mock_broken_supplier() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

async fn count_rows_for(pool: &sqlx::PgPool, supplier_name: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM fuel_prices WHERE supplier_name = $1")
        .bind(supplier_name)
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

#[sqlx::test(migrations = "../../migrations")]
async fn failing_supplier_does_not_block_the_rest(pool: sqlx::PgPool) {
    let healthy = mock_supplier_page(
        r#"<html><body>
            <div class="kvtext">100 gallons or more- $3.10 per gallon</div>
            <div class="kvtext">150 gallons or more- $2.89 per gallon</div>
        </body></html>"#,
    )
    .await;
    let broken = mock_broken_supplier().await;

    let mut good = supplier("Dan Bell Oil");
    good.url = healthy.uri();
    let mut bad = supplier("Oil Patch Fuel");
    bad.url = broken.uri();

    // The failing supplier runs first; the healthy one must still store rows.
    let summary = collect_suppliers(&pool, &test_client(), None, vec![bad, good], 1, &no_cancel())
        .await
        .expect("a partial failure is a successful run");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.records, 2);
    assert_eq!(count_rows_for(&pool, "Dan Bell Oil").await, 2);
    assert_eq!(count_rows_for(&pool, "Oil Patch Fuel").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn run_fails_only_when_every_supplier_fails(pool: sqlx::PgPool) {
    let broken_a = mock_broken_supplier().await;
    let broken_b = mock_broken_supplier().await;

    let mut a = supplier("Dan Bell Oil");
    a.url = broken_a.uri();
    let mut b = supplier("Oil Patch Fuel");
    b.url = broken_b.uri();

    let result = collect_suppliers(&pool, &test_client(), None, vec![a, b], 1, &no_cancel()).await;

    let err = result.expect_err("expected Err when all suppliers fail");
    let msg = format!("{err}");
    assert!(
        msg.contains("suppliers failed collection"),
        "error should report total failure, got: {msg}"
    );
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fuel_prices")
        .fetch_one(&pool)
        .await
        .expect("count query failed");
    assert_eq!(total, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn zero_tier_page_is_a_successful_supplier(pool: sqlx::PgPool) {
    let restructured =
        mock_supplier_page("<html><body><p>We moved our price list!</p></body></html>").await;

    let mut s = supplier("Dan Bell Oil");
    s.url = restructured.uri();

    let summary = collect_suppliers(&pool, &test_client(), None, vec![s], 1, &no_cancel())
        .await
        .expect("zero tiers is a valid observation, not a failure");

    assert_eq!(summary.failed, 0);
    assert_eq!(summary.records, 0);
}
