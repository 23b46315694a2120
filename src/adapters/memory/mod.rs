//! In-memory adapters for deterministic tests.

pub mod sheets;
pub mod source;

pub use sheets::{MemorySheets, MemoryWorksheet, RemoteFailure};
pub use source::MemorySource;
