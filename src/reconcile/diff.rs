//! The new-vs-existing diff and its owned result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::contact::ContactRecord;

/// Keeps the source records whose normalized email is not already known.
///
/// A single order-preserving linear filter. Duplicates *within* the
/// source are not collapsed: if the same new email appears twice in the
/// file, both copies pass through. Only remote-known identities block.
#[must_use]
pub fn filter_new(records: Vec<ContactRecord>, existing: &HashSet<String>) -> Vec<ContactRecord> {
    records.into_iter().filter(|record| !existing.contains(&record.normalized_email())).collect()
}

/// The outcome of one analysis pass.
///
/// Owns the ordered list of new contacts plus the counts observed while
/// producing it. Each analysis run produces a fresh value; there is no
/// merging across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    new_contacts: Vec<ContactRecord>,
    /// Data rows read from the source file.
    pub source_total: usize,
    /// Distinct identities already present in the sheet.
    pub existing_total: usize,
}

impl Reconciliation {
    /// Assembles a result from the diff output and the observed counts.
    #[must_use]
    pub fn new(
        new_contacts: Vec<ContactRecord>,
        source_total: usize,
        existing_total: usize,
    ) -> Self {
        Self { new_contacts, source_total, existing_total }
    }

    /// The ordered new contacts, source order preserved.
    #[must_use]
    pub fn new_contacts(&self) -> &[ContactRecord] {
        &self.new_contacts
    }

    /// Number of new contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.new_contacts.len()
    }

    /// Whether the diff found nothing to add.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_contacts.is_empty()
    }

    /// Replaces the record at `position` (0-based) before syncing.
    ///
    /// Both fields are swapped at once; returns `false` when the
    /// position is out of bounds.
    pub fn replace(&mut self, position: usize, record: ContactRecord) -> bool {
        match self.new_contacts.get_mut(position) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// The 1-based inclusive bounds a range selection may use.
    #[must_use]
    pub fn range_bounds(&self) -> Option<(usize, usize)> {
        if self.new_contacts.is_empty() {
            None
        } else {
            Some((1, self.new_contacts.len()))
        }
    }

    /// One-line analysis summary for the log and the preview header.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Source file: {} contacts | Sheet: {} unique | NEW: {}",
            self.source_total,
            self.existing_total,
            self.new_contacts.len()
        )
    }
}
