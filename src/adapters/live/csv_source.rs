//! CSV source reader.

use std::path::Path;

use crate::error::{Error, Result};
use crate::ports::SourceReader;

/// Reads contact source files in CSV format.
///
/// Other tabular formats would plug in as further [`SourceReader`]
/// implementations; anything that is not `.csv` is rejected here.
pub struct CsvSource;

fn source_error(path: &Path, err: &dyn std::fmt::Display) -> Error {
    Error::Source { path: path.display().to_string(), message: err.to_string() }
}

fn check_extension(path: &Path) -> Result<()> {
    let recognized = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if recognized {
        Ok(())
    } else {
        Err(Error::UnsupportedSource { path: path.display().to_string() })
    }
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    check_extension(path)?;
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| source_error(path, &e))
}

impl SourceReader for CsvSource {
    fn read_headers(&self, path: &Path) -> Result<Vec<String>> {
        // The csv reader is lazy: headers() parses only the first record,
        // which keeps the pre-validation pass cheap on large files.
        let mut reader = reader(path)?;
        let headers = reader.headers().map_err(|e| source_error(path, &e))?;
        Ok(headers.iter().map(ToString::to_string).collect())
    }

    fn read_records(&self, path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut reader = reader(path)?;
        let headers: Vec<String> =
            reader.headers().map_err(|e| source_error(path, &e))?.iter().map(ToString::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| source_error(path, &e))?;
            rows.push(record.iter().map(ToString::to_string).collect());
        }
        Ok((headers, rows))
    }
}
