use std::path::PathBuf;

/// Default browser-profile user agent. Several supplier origins reject
/// non-browser user agents outright, so the default imitates desktop Firefox.
pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/113.0";

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Base URL of the downstream ingestion API. Relay is disabled when unset.
    pub ingest_url: Option<String>,
    pub log_level: String,
    pub suppliers_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_suppliers: usize,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub relay_batch_size: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("ingest_url", &self.ingest_url)
            .field("log_level", &self.log_level)
            .field("suppliers_path", &self.suppliers_path)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_suppliers", &self.max_concurrent_suppliers)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("relay_batch_size", &self.relay_batch_size)
            .finish()
    }
}
