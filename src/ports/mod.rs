//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipeline core and an
//! external system (the remote spreadsheet store, the local tabular
//! source file). Implementations live in `src/adapters/`.

pub mod sheets;
pub mod source;

pub use sheets::{SheetProvider, SheetSession, Worksheet};
pub use source::SourceReader;
