//! Destructive reset: confirm, erase, restore only the header.

use crate::error::Result;
use crate::ports::Worksheet;

/// Header restored when the sheet turns out to be headerless.
pub const DEFAULT_HEADER: [&str; 5] =
    ["First name", "Last name", "Recipient", "Description", "Email Sent"];

/// What a reset run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The sheet had no data rows; nothing was touched.
    AlreadyEmpty,
    /// The caller declined the confirmation; nothing was touched.
    Declined {
        /// Data rows that would have been erased.
        rows: usize,
    },
    /// The sheet was cleared and its header restored.
    Cleared {
        /// Data rows erased.
        rows: usize,
    },
}

/// Clears all rows, keeping (or installing) the header.
///
/// `confirm` is called with the data row count once it is known to be
/// non-zero, and blocks until the caller decides; declining aborts with
/// no mutation. On confirmation the header is captured first, then the
/// sheet is cleared, then only the header is written back — in that
/// order, so a failure between the two writes can never leave data rows
/// behind a missing header.
///
/// # Errors
///
/// Returns any remote error from the count, clear, or header write.
pub fn reset_sheet<F>(sheet: &dyn Worksheet, confirm: F) -> Result<ResetOutcome>
where
    F: FnOnce(usize) -> bool,
{
    let rows = sheet.row_count()?;
    if rows == 0 {
        return Ok(ResetOutcome::AlreadyEmpty);
    }
    if !confirm(rows) {
        return Ok(ResetOutcome::Declined { rows });
    }

    let header = sheet.header_row()?;
    let header = if header.is_empty() {
        DEFAULT_HEADER.map(String::from).to_vec()
    } else {
        header
    };

    sheet.clear_all()?;
    sheet.write_row(1, header)?;
    Ok(ResetOutcome::Cleared { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryWorksheet;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn populated() -> MemoryWorksheet {
        MemoryWorksheet::with_rows(
            strings(&["First name", "Last name", "Recipient"]),
            vec![
                strings(&["Ana", "", "ana@x.com"]),
                strings(&["Bo", "", "bo@x.com"]),
            ],
        )
    }

    #[test]
    fn empty_sheet_reports_already_empty_without_mutation() {
        let sheet = MemoryWorksheet::with_rows(strings(&["Recipient"]), Vec::new());
        let outcome = reset_sheet(&sheet, |_| panic!("must not ask")).unwrap();
        assert_eq!(outcome, ResetOutcome::AlreadyEmpty);
        assert!(sheet.calls().is_empty());
    }

    #[test]
    fn declined_confirmation_leaves_sheet_untouched() {
        let sheet = populated();
        let outcome = reset_sheet(&sheet, |rows| {
            assert_eq!(rows, 2);
            false
        })
        .unwrap();
        assert_eq!(outcome, ResetOutcome::Declined { rows: 2 });
        assert!(sheet.calls().is_empty());
        assert_eq!(sheet.rows_snapshot().len(), 3);
    }

    #[test]
    fn confirmed_reset_clears_then_restores_header() {
        let sheet = populated();
        let outcome = reset_sheet(&sheet, |_| true).unwrap();
        assert_eq!(outcome, ResetOutcome::Cleared { rows: 2 });
        assert_eq!(sheet.calls(), ["clear_all", "write_row"]);
        assert_eq!(
            sheet.rows_snapshot(),
            vec![strings(&["First name", "Last name", "Recipient"])]
        );
    }

    #[test]
    fn headerless_sheet_gets_the_default_header() {
        // No header row at all, but data rows present: row_count treats
        // the first row as the header, so seed two rows.
        let sheet = MemoryWorksheet::with_rows(Vec::new(), vec![strings(&["orphan", "", "x@x.com"])]);
        let outcome = reset_sheet(&sheet, |_| true).unwrap();
        assert_eq!(outcome, ResetOutcome::Cleared { rows: 1 });
        let rows = sheet.rows_snapshot();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], DEFAULT_HEADER.map(String::from).to_vec());
    }
}
