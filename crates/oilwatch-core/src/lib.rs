//! Shared configuration and record types for the oilwatch workspace.

use thiserror::Error;

mod app_config;
mod config;
mod records;
mod suppliers;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::PriceRecord;
pub use suppliers::{
    load_suppliers, SelectorConfig, StrategyKind, SupplierConfig, SuppliersFile,
    DEFAULT_REFERENCE_GALLONS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read suppliers file {path}: {source}")]
    SuppliersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse suppliers file: {0}")]
    SuppliersFileParse(#[from] serde_yaml::Error),

    #[error("supplier config validation failed: {0}")]
    Validation(String),
}
