//! HTTP client for the downstream price ingestion API.
//!
//! Posts batches of [`WirePriceRecord`]s to `{base}/prices`. A failed batch is
//! logged and skipped; later batches are still attempted, so one bad request
//! cannot strand the rest of a run's records.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::error::RelayError;
use crate::types::WirePriceRecord;
use oilwatch_core::PriceRecord;

/// Client for the price ingestion API.
///
/// Holds the HTTP client, base URL, and batch size. Use
/// [`RelayClient::new`] with the configured ingestion URL, or point it at a
/// mock server in tests.
#[derive(Debug)]
pub struct RelayClient {
    client: Client,
    base_url: Url,
    batch_size: usize,
}

impl RelayClient {
    /// Creates a new client for the ingestion API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`RelayError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, batch_size: usize) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("oilwatch/0.1 (price-relay)")
            .build()?;

        // Keep exactly one trailing slash so join() appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| RelayError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            base_url,
            batch_size: batch_size.max(1),
        })
    }

    /// Forwards `records` in batches of at most the configured size.
    ///
    /// Returns the number of records successfully accepted downstream. Batch
    /// failures are logged, not propagated: the local store already holds the
    /// rows, and a partial relay is preferable to none.
    pub async fn relay_records(&self, records: &[PriceRecord]) -> usize {
        let mut accepted = 0usize;
        for batch in records.chunks(self.batch_size) {
            let wire: Vec<WirePriceRecord> = batch.iter().map(WirePriceRecord::from).collect();
            match self.post_batch(&wire).await {
                Ok(()) => {
                    debug!(batch_len = batch.len(), "relayed price batch");
                    accepted += batch.len();
                }
                Err(e) => {
                    warn!(batch_len = batch.len(), error = %e, "failed to relay price batch");
                }
            }
        }
        accepted
    }

    /// Sends one batch and asserts a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Http`] on network failure or
    /// [`RelayError::UnexpectedStatus`] on a non-2xx response.
    async fn post_batch(&self, batch: &[WirePriceRecord]) -> Result<(), RelayError> {
        let url = self.prices_url();
        let response = self.client.post(url.clone()).json(batch).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }
        Ok(())
    }

    fn prices_url(&self) -> Url {
        // The base URL always ends in '/', so join cannot fail on a relative
        // segment; fall back to the base itself if it somehow does.
        self.base_url
            .join("prices")
            .unwrap_or_else(|_| self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> RelayClient {
        RelayClient::new(base_url, 30, 50).expect("client construction should not fail")
    }

    #[test]
    fn prices_url_appends_path_segment() {
        let client = test_client("https://ingest.example.com");
        assert_eq!(
            client.prices_url().as_str(),
            "https://ingest.example.com/prices"
        );
    }

    #[test]
    fn prices_url_tolerates_trailing_slash() {
        let client = test_client("https://ingest.example.com/api/");
        assert_eq!(
            client.prices_url().as_str(),
            "https://ingest.example.com/api/prices"
        );
    }

    #[test]
    fn zero_batch_size_is_clamped_to_one() {
        let client = RelayClient::new("https://ingest.example.com", 30, 0).unwrap();
        assert_eq!(client.batch_size, 1);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = RelayClient::new("not a url", 30, 50).unwrap_err();
        assert!(matches!(err, RelayError::InvalidBaseUrl(_)));
    }
}
