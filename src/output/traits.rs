//! Output writer trait and errors
//!
//! This module defines the interface used to persist the harvested product
//! collection.

use crate::extract::ProductRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize products: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for product collection writers
///
/// A writer receives the complete collection once, at the end of a harvest
/// run, and replaces whatever it wrote previously.
pub trait ProductWriter {
    /// Persists the full product collection
    ///
    /// # Arguments
    ///
    /// * `records` - The collected records, in harvest order
    fn write_products(&self, records: &[ProductRecord]) -> OutputResult<()>;

    /// Human-readable description of where the records go
    fn destination(&self) -> String;
}
