//! Ingestion layer: StatsBomb open-data fetch and load.
//!
//! [`OpenDataStore`](s3::OpenDataStore) reads JSON objects from the
//! open-data bucket; [`DataLoader`](loader::DataLoader) walks the bucket
//! layout and upserts into the [`MatchStore`](crate::persistence::MatchStore).
//! Per-match failures are logged and counted, never fatal.

pub mod loader;
pub mod s3;
pub mod statsbomb;

pub use loader::{DataLoader, LoadReport, load_local_events};
pub use s3::OpenDataStore;

use crate::error::ServiceError;

/// Errors raised by the ingestion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The object could not be fetched from the bucket.
    #[error("fetch {key}: {message}")]
    Fetch {
        /// Object key that failed.
        key: String,
        /// Underlying SDK error, flattened to text.
        message: String,
    },

    /// The object body was not valid JSON for the expected shape.
    #[error("decode {key}: {message}")]
    Decode {
        /// Object key that failed.
        key: String,
        /// Underlying serde error, flattened to text.
        message: String,
    },

    /// A local event file could not be read.
    #[error("read local file: {0}")]
    Io(#[from] std::io::Error),

    /// The database rejected the batch.
    #[error(transparent)]
    Store(#[from] ServiceError),
}
