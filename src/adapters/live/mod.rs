//! Live adapters backed by the real filesystem and spreadsheet API.

pub mod csv_source;
pub mod sheets;

pub use csv_source::CsvSource;
pub use sheets::SheetsApi;
