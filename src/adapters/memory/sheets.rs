//! In-memory worksheet with a recorded call log.
//!
//! The call log is the test seam for the pipeline's no-touch
//! guarantees: simulate mode and declined confirmations must leave it
//! free of mutating calls.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::ports::{SheetProvider, SheetSession, Worksheet};

/// Failure the in-memory store can be armed to return on every remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailure {
    /// Transport-level connectivity failure.
    Network,
    /// The API denies the service account access.
    PermissionDenied,
    /// A generic API failure.
    Api,
}

impl RemoteFailure {
    fn to_error(self) -> Error {
        match self {
            RemoteFailure::Network => Error::Network { message: "connection refused".into() },
            RemoteFailure::PermissionDenied => {
                Error::PermissionDenied { status: "PERMISSION_DENIED".into() }
            }
            RemoteFailure::Api => {
                Error::Api { status: "500".into(), message: "internal error".into() }
            }
        }
    }
}

/// An in-memory worksheet. Row 0 is the header row, when present.
#[derive(Debug, Default)]
pub struct MemoryWorksheet {
    title: String,
    rows: Mutex<Vec<Vec<String>>>,
    calls: Mutex<Vec<String>>,
    failure: Mutex<Option<RemoteFailure>>,
}

impl MemoryWorksheet {
    /// Creates a worksheet with a header row and data rows.
    #[must_use]
    pub fn with_rows(header: Vec<String>, data: Vec<Vec<String>>) -> Self {
        let mut rows = vec![header];
        rows.extend(data);
        Self { title: "Mail merge".to_string(), rows: Mutex::new(rows), ..Self::default() }
    }

    /// Creates a worksheet with no rows at all (not even a header).
    #[must_use]
    pub fn empty() -> Self {
        Self { title: "Mail merge".to_string(), ..Self::default() }
    }

    /// Arms every subsequent remote call to fail with `failure`.
    pub fn fail_with(&self, failure: RemoteFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    /// The mutating calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// A snapshot of the sheet contents, header row included.
    #[must_use]
    pub fn rows_snapshot(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match *self.failure.lock().unwrap() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn record_call(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

impl Worksheet for MemoryWorksheet {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn header_row(&self) -> Result<Vec<String>> {
        self.check_failure()?;
        Ok(self.rows.lock().unwrap().first().cloned().unwrap_or_default())
    }

    fn read_column(&self, index: usize) -> Result<Vec<String>> {
        self.check_failure()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .skip(1)
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }

    fn row_count(&self) -> Result<usize> {
        self.check_failure()?;
        Ok(self.rows.lock().unwrap().len().saturating_sub(1))
    }

    fn clear_all(&self) -> Result<()> {
        self.check_failure()?;
        self.record_call("clear_all");
        self.rows.lock().unwrap().clear();
        Ok(())
    }

    fn append_rows(&self, new_rows: Vec<Vec<String>>) -> Result<()> {
        self.check_failure()?;
        self.record_call("append_rows");
        self.rows.lock().unwrap().extend(new_rows);
        Ok(())
    }

    fn write_row(&self, index: usize, values: Vec<String>) -> Result<()> {
        self.check_failure()?;
        self.record_call("write_row");
        let mut rows = self.rows.lock().unwrap();
        while rows.len() < index {
            rows.push(Vec::new());
        }
        rows[index - 1] = values;
        Ok(())
    }
}

/// Provider/session pair serving one shared in-memory worksheet.
#[derive(Debug, Clone)]
pub struct MemorySheets {
    worksheet: Arc<MemoryWorksheet>,
}

impl MemorySheets {
    /// Creates a provider serving the given worksheet.
    #[must_use]
    pub fn new(worksheet: Arc<MemoryWorksheet>) -> Self {
        Self { worksheet }
    }

    /// The shared worksheet, for post-run assertions.
    #[must_use]
    pub fn worksheet(&self) -> Arc<MemoryWorksheet> {
        Arc::clone(&self.worksheet)
    }
}

impl SheetProvider for MemorySheets {
    fn authenticate(&self, _credential_path: &Path) -> Result<Box<dyn SheetSession>> {
        Ok(Box::new(MemorySession { worksheet: Arc::clone(&self.worksheet) }))
    }
}

struct MemorySession {
    worksheet: Arc<MemoryWorksheet>,
}

impl SheetSession for MemorySession {
    fn open_by_locator(&self, _locator: &str) -> Result<Box<dyn Worksheet>> {
        Ok(Box::new(SharedWorksheet(Arc::clone(&self.worksheet))))
    }
}

/// A cloneable handle onto a shared [`MemoryWorksheet`].
struct SharedWorksheet(Arc<MemoryWorksheet>);

impl Worksheet for SharedWorksheet {
    fn title(&self) -> String {
        self.0.title()
    }
    fn header_row(&self) -> Result<Vec<String>> {
        self.0.header_row()
    }
    fn read_column(&self, index: usize) -> Result<Vec<String>> {
        self.0.read_column(index)
    }
    fn row_count(&self) -> Result<usize> {
        self.0.row_count()
    }
    fn clear_all(&self) -> Result<()> {
        self.0.clear_all()
    }
    fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        self.0.append_rows(rows)
    }
    fn write_row(&self, index: usize, values: Vec<String>) -> Result<()> {
        self.0.write_row(index, values)
    }
}
