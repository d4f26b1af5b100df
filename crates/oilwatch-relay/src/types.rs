use chrono::NaiveDate;
use oilwatch_core::PriceRecord;
use rust_decimal::Decimal;
use serde::Serialize;

/// A price record as serialized for the ingestion API.
///
/// The API takes a calendar date rather than a full timestamp, and expects
/// `price` as a JSON number.
#[derive(Debug, Clone, Serialize)]
pub struct WirePriceRecord {
    pub date: NaiveDate,
    pub supplier_name: String,
    pub supplier_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub gallons: i32,
}

impl From<&PriceRecord> for WirePriceRecord {
    fn from(record: &PriceRecord) -> Self {
        Self {
            date: record.date.date_naive(),
            supplier_name: record.supplier_name.clone(),
            supplier_url: record.supplier_url.clone(),
            price: record.price,
            gallons: record.gallons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> PriceRecord {
        PriceRecord {
            date: Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 0).single().unwrap(),
            supplier_name: "Dan Bell Oil".to_string(),
            supplier_url: "https://example.com/prices".to_string(),
            gallons: 150,
            price: Decimal::new(289, 2),
        }
    }

    #[test]
    fn wire_record_drops_time_component() {
        let wire = WirePriceRecord::from(&record());
        assert_eq!(wire.date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn wire_record_serializes_price_as_json_number() {
        let wire = WirePriceRecord::from(&record());
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["date"], "2026-01-15");
        assert_eq!(json["supplier_name"], "Dan Bell Oil");
        assert_eq!(json["gallons"], 150);
        assert!(json["price"].is_number(), "price should not be a string: {json}");
        assert!((json["price"].as_f64().unwrap() - 2.89).abs() < 1e-9);
    }
}
