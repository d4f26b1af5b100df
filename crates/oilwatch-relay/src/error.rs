use thiserror::Error;

/// Errors returned by the ingestion relay client.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The ingestion API answered with a non-success status.
    #[error("ingestion API returned {status} for {url}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The configured ingestion base URL could not be parsed.
    #[error("invalid ingestion base URL '{0}'")]
    InvalidBaseUrl(String),
}
