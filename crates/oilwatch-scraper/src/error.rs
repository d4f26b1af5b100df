use thiserror::Error;

/// Fetch-level failures. Pattern and selector misses are deliberately not
/// errors — they produce zero quotes, since a page may legitimately advertise
/// no tiers. A `ScrapeError` aborts only the affected supplier's run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
