//! Forwarding of freshly stored price records to a downstream ingestion API.
//!
//! The relay is best-effort: the local database is the source of truth, and a
//! failed POST never fails the run. Records are sent in bounded batches so a
//! large backfill cannot produce an oversized request body.

mod client;
mod error;
mod types;

pub use client::RelayClient;
pub use error::RelayError;
pub use types::WirePriceRecord;
