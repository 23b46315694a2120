//! Local tabular source file port.

use std::path::Path;

use crate::error::Result;

/// Reads the local contact source file.
pub trait SourceReader: Send + Sync {
    /// Reads only the header row.
    ///
    /// Must not load row data; the header pre-validation pass depends on
    /// this staying cheap for large files.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or has no header.
    fn read_headers(&self, path: &Path) -> Result<Vec<String>>;

    /// Reads the header row and all data rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn read_records(&self, path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)>;
}
