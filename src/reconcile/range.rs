//! Range selection over a reconciliation result.

use crate::contact::ContactRecord;
use crate::error::{Error, Result};

/// Selects the 1-based inclusive `start..=end` slice of `records`.
///
/// Pure slicing: re-appliable with different ranges over the same
/// result, so a caller can preview, adjust, and preview again before
/// committing.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] unless `1 <= start <= end <= len`.
pub fn select(records: &[ContactRecord], start: usize, end: usize) -> Result<&[ContactRecord]> {
    if start < 1 || start > end || end > records.len() {
        return Err(Error::InvalidRange { start, end, len: records.len() });
    }
    Ok(&records[start - 1..end])
}
