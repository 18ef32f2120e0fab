//! Application-wide error types.
//!
//! Library modules carry specific error types via `thiserror`; the CLI
//! aggregates them here and `main` uses `anyhow` for final propagation.
//!
//! Only three things are allowed to terminate the process: configuration
//! resolution, dataset I/O, and token acquisition. Per-row catalog faults
//! never reach this level - the enrichment service absorbs them.

use crate::dataset::DatasetError;
use crate::enrichment::CatalogError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset read/write error
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Catalog access error (token acquisition, for the batch path)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("missing catalog client id");
        assert!(err.to_string().contains("missing catalog client id"));
    }

    #[test]
    fn test_dataset_error_converts() {
        let err: Error = DatasetError::MissingColumn("track_name".to_string()).into();
        assert!(err.to_string().contains("track_name"));
    }

    #[test]
    fn test_catalog_error_converts() {
        let err: Error = CatalogError::Auth("bad client".to_string()).into();
        assert!(err.to_string().contains("bad client"));
    }
}
