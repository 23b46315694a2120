//! Service context bundling the port trait objects.

use std::sync::Arc;

use crate::adapters::live::{CsvSource, SheetsApi};
use crate::adapters::memory::{MemorySheets, MemoryWorksheet};
use crate::ports::{SheetProvider, SourceReader};

/// Bundles the two external boundaries a worker needs.
///
/// Constructors wire up different adapter implementations; workers move
/// a context onto their own thread, so everything in it is `Send`.
pub struct ServiceContext {
    /// Remote spreadsheet backend.
    pub sheets: Box<dyn SheetProvider>,
    /// Local contact source reader.
    pub source: Box<dyn SourceReader>,
}

impl ServiceContext {
    /// Creates a live context: real Sheets API, real CSV files.
    #[must_use]
    pub fn live() -> Self {
        Self { sheets: Box::new(SheetsApi::new()), source: Box::new(CsvSource) }
    }

    /// Creates an in-memory context over a shared worksheet.
    ///
    /// The source is generic so tests can keep a shared handle (e.g.
    /// `Arc<MemorySource>`) for post-run assertions.
    #[must_use]
    pub fn in_memory(
        worksheet: Arc<MemoryWorksheet>,
        source: impl SourceReader + 'static,
    ) -> Self {
        Self { sheets: Box::new(MemorySheets::new(worksheet)), source: Box::new(source) }
    }
}
