//! Identity set construction from the remote store.
//!
//! Only the recipient column is fetched, not the full table: remote
//! reads are network-bound and identity is all the diff needs.

use std::collections::HashSet;

use crate::contact::normalize_email;
use crate::error::{Error, Result};
use crate::ports::Worksheet;

/// The destination column holding already-synced recipient emails.
pub const RECIPIENT_HEADER: &str = "Recipient";

/// Builds the identity set from raw column values.
///
/// Blank values are dropped; the rest are trimmed and lowercased.
/// Duplicates collapse silently (a set, not a multiset).
#[must_use]
pub fn build<I>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .map(|value| normalize_email(&value))
        .collect()
}

/// Fetches the recipient column and builds the identity set snapshot.
///
/// The snapshot is read once per operation; remote edits made after the
/// fetch are invisible to the diff.
///
/// # Errors
///
/// Returns [`Error::SchemaViolation`] if the sheet has no
/// [`RECIPIENT_HEADER`] column, or any remote error from the read.
pub fn fetch(sheet: &dyn Worksheet) -> Result<HashSet<String>> {
    let headers = sheet.header_row()?;
    let index = headers
        .iter()
        .position(|h| h == RECIPIENT_HEADER)
        .ok_or_else(|| Error::SchemaViolation { header: RECIPIENT_HEADER.to_string() })?;
    let values = sheet.read_column(index)?;
    Ok(build(values))
}
