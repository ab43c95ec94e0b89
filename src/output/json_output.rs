//! JSON file output
//!
//! Writes the product collection as a single pretty-printed JSON array,
//! four-space indented, with non-ASCII characters left unescaped.

use crate::extract::ProductRecord;
use crate::output::traits::{OutputError, OutputResult, ProductWriter};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const INDENT: &[u8] = b"    ";

/// Writes products to a JSON file, overwriting it on every run
#[derive(Debug, Clone)]
pub struct JsonFileOutput {
    path: PathBuf,
}

impl JsonFileOutput {
    /// Creates a writer for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> OutputError {
        OutputError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProductWriter for JsonFileOutput {
    fn write_products(&self, records: &[ProductRecord]) -> OutputResult<()> {
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);

        write_json(&mut writer, records)?;
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::info!("Data saved to {}", self.path.display());
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serializes records as a four-space indented JSON array
pub fn write_json<W: Write>(writer: W, records: &[ProductRecord]) -> OutputResult<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    records.serialize(&mut serializer)?;
    Ok(())
}
