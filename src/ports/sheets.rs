//! Remote spreadsheet store port.
//!
//! Mirrors the capability surface of a spreadsheet API: authenticate,
//! open a named resource, then read and write rows in bulk. Adapters
//! classify their failures into the structured [`Error`](crate::error::Error)
//! kinds before they cross this boundary, so the pipeline never has to
//! string-match transport messages.

use std::path::Path;

use crate::error::Result;

/// Entry point to a spreadsheet backend.
pub trait SheetProvider: Send + Sync {
    /// Authenticates with the credential file and returns a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential file is unusable or the
    /// backend rejects it.
    fn authenticate(&self, credential_path: &Path) -> Result<Box<dyn SheetSession>>;
}

/// An authenticated session able to open spreadsheets by locator.
pub trait SheetSession: Send + Sync {
    /// Opens the spreadsheet identified by `locator` (URL or ID) and
    /// returns a handle to its first worksheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the spreadsheet does not exist or cannot be
    /// reached.
    fn open_by_locator(&self, locator: &str) -> Result<Box<dyn Worksheet>>;
}

/// An open worksheet inside a spreadsheet.
///
/// Row indices are 1-based to match spreadsheet conventions; row 1 is
/// the header row. Column reads are exposed individually so callers can
/// fetch one identity column instead of the whole table.
pub trait Worksheet: Send + Sync {
    /// The spreadsheet's title, for connection log lines.
    fn title(&self) -> String;

    /// Reads the header row. Empty if the sheet has no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn header_row(&self) -> Result<Vec<String>>;

    /// Reads one column's data values (0-based index, header excluded).
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn read_column(&self, index: usize) -> Result<Vec<String>>;

    /// Counts data rows, excluding the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn row_count(&self) -> Result<usize>;

    /// Erases every row, header included.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear fails.
    fn clear_all(&self) -> Result<()>;

    /// Appends rows after the last non-empty row, in one bulk call.
    ///
    /// # Errors
    ///
    /// Returns an error if the append fails; the bulk call is atomic at
    /// the transport layer, so a failure leaves the sheet unchanged.
    fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()>;

    /// Overwrites one row (1-based index) with the given values.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_row(&self, index: usize, values: Vec<String>) -> Result<()>;
}
