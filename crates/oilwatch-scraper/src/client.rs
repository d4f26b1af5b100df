use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use reqwest::Client;

use crate::error::ScrapeError;
use crate::retry::retry_with_backoff;
use crate::types::FetchValidators;

/// HTTP client for supplier marketing pages.
///
/// Sends a browser-like header profile on every request — several supplier
/// origins serve an error page or 403 to obvious non-browser agents. Supports
/// conditional fetches: when cached validators are supplied, they are attached
/// as `If-Modified-Since`/`If-None-Match` and a 304 is surfaced as
/// [`FetchOutcome::NotModified`] instead of an error.
///
/// Transient errors (429, network failures) are automatically retried with
/// exponential backoff up to `max_retries` additional attempts.
pub struct PageClient {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

/// Result of one page fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The origin confirmed the page is unchanged (HTTP 304). Extraction is
    /// skipped; previously stored records remain authoritative.
    NotModified,
    /// A full body was returned, along with whatever cache validators the
    /// response carried (empty when the origin sends none).
    Fetched {
        html: String,
        validators: FetchValidators,
    },
}

impl PageClient {
    /// Creates a `PageClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first failure
    /// for retriable errors (429, network errors). Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(browser_profile_headers())
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches a supplier page, optionally as a conditional request.
    ///
    /// When `validators` is `Some` and carries a value, the cached
    /// `Last-Modified`/`ETag` are attached as request validators; an HTTP 304
    /// response then yields [`FetchOutcome::NotModified`]. Callers in the
    /// no-prior-validators state pass `None` and always receive a full body.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScrapeError::UnexpectedStatus`] — any other non-2xx, non-304 status (not retried).
    /// - [`ScrapeError::Http`] — network or TLS failure after all retries exhausted.
    pub async fn fetch_page(
        &self,
        url: &str,
        validators: Option<&FetchValidators>,
    ) -> Result<FetchOutcome, ScrapeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let mut request = self.client.get(&url);
                if let Some(v) = validators {
                    if let Some(lm) = v.last_modified.as_deref() {
                        request = request.header(IF_MODIFIED_SINCE, lm);
                    }
                    if let Some(etag) = v.etag.as_deref() {
                        request = request.header(IF_NONE_MATCH, etag);
                    }
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::NOT_MODIFIED {
                    return Ok(FetchOutcome::NotModified);
                }

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    return Err(ScrapeError::RateLimited {
                        domain: extract_domain(&url),
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(ScrapeError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                // Capture response validators before consuming the body.
                let validators = FetchValidators {
                    last_modified: header_string(response.headers(), LAST_MODIFIED.as_str()),
                    etag: header_string(response.headers(), ETAG.as_str()),
                };

                let html = response.text().await?;
                Ok(FetchOutcome::Fetched { html, validators })
            }
        })
        .await
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Static request headers imitating a desktop browser navigation. The
/// `User-Agent` itself is configured on the client builder.
fn browser_profile_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        reqwest::header::REFERER,
        HeaderValue::from_static("https://www.google.com/"),
    );
    headers.insert(
        reqwest::header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

/// Extracts the hostname from a page URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
fn extract_domain(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(url)
        .to_owned()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
