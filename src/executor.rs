//! Sync executor: applies (or simulates) the append of selected rows.

use crate::contact::ContactRecord;
use crate::error::{Error, Result};
use crate::ports::Worksheet;

/// How the executor should run.
///
/// Simulate mode carries no worksheet at all, so it cannot touch the
/// remote store even by accident.
pub enum SyncMode<'a> {
    /// Compute and report the would-be row count; no remote calls.
    Simulate,
    /// Append the rows to the given worksheet in one bulk call.
    Commit(&'a dyn Worksheet),
}

/// What a sync run did (or would have done).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Rows appended (commit) or that would be appended (simulate).
    pub rows: usize,
    /// Whether this outcome came from a simulation.
    pub simulated: bool,
}

/// The destination's three-column row shape: name, gap, email.
///
/// The gap column is a structural contract with the mail-merge sheet's
/// layout (its second column belongs to another field), not incidental.
#[must_use]
pub fn shape_row(record: &ContactRecord) -> Vec<String> {
    vec![record.display_name.clone(), String::new(), record.recipient_email.clone()]
}

/// Applies the selected records according to `mode`.
///
/// Commit mode issues exactly one bulk append, preserving input order;
/// a failed bulk call leaves the sheet unchanged.
///
/// # Errors
///
/// Returns [`Error::NothingToSync`] for an empty selection (before any
/// remote call), or any remote error from the append.
pub fn execute(selection: &[ContactRecord], mode: SyncMode<'_>) -> Result<SyncOutcome> {
    if selection.is_empty() {
        return Err(Error::NothingToSync);
    }

    match mode {
        SyncMode::Simulate => Ok(SyncOutcome { rows: selection.len(), simulated: true }),
        SyncMode::Commit(sheet) => {
            let rows: Vec<Vec<String>> = selection.iter().map(shape_row).collect();
            let count = rows.len();
            sheet.append_rows(rows)?;
            Ok(SyncOutcome { rows: count, simulated: false })
        }
    }
}
