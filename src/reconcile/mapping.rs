//! Column mapping resolution for the source file.
//!
//! Source files come from several upstream systems that disagree on
//! header names, so the actual name/email columns are picked from
//! configured candidate lists, tried in the caller's priority order.

use crate::contact::ContactRecord;
use crate::error::{Error, Result};

/// The resolved source columns for one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// 0-based index of the name column in the source header.
    pub name_index: usize,
    /// 0-based index of the email column in the source header.
    pub email_index: usize,
    /// The header that matched a name candidate.
    pub name_header: String,
    /// The header that matched an email candidate.
    pub email_header: String,
}

/// Finds the first candidate present in `headers`, in candidate order.
fn first_match(headers: &[String], candidates: &[String]) -> Option<usize> {
    candidates.iter().find_map(|candidate| headers.iter().position(|h| h == candidate))
}

/// Resolves the name and email columns from the header row.
///
/// Candidates are tried in the order given; the first match wins.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`] naming the side(s) with no match.
pub fn resolve(
    headers: &[String],
    name_candidates: &[String],
    email_candidates: &[String],
) -> Result<ColumnMapping> {
    let name_index = first_match(headers, name_candidates);
    let email_index = first_match(headers, email_candidates);

    match (name_index, email_index) {
        (Some(name_index), Some(email_index)) => Ok(ColumnMapping {
            name_index,
            email_index,
            name_header: headers[name_index].clone(),
            email_header: headers[email_index].clone(),
        }),
        (name, email) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("NAME");
            }
            if email.is_none() {
                missing.push("EMAIL");
            }
            Err(Error::ColumnNotFound { missing: missing.join(", ") })
        }
    }
}

/// Applies a mapping to raw rows, producing validated contact records.
///
/// Rows missing either mapped field (absent cell or blank after trim)
/// are dropped, matching the drop-incomplete-rows behavior expected of
/// the analysis pass.
#[must_use]
pub fn extract_records(rows: &[Vec<String>], mapping: &ColumnMapping) -> Vec<ContactRecord> {
    rows.iter()
        .filter_map(|row| {
            let name = row.get(mapping.name_index)?;
            let email = row.get(mapping.email_index)?;
            if name.trim().is_empty() {
                return None;
            }
            ContactRecord::new(name, email)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolve_picks_first_candidate_in_priority_order() {
        let header = headers(&["Email", "NOME", "First name"]);
        let mapping = resolve(
            &header,
            &candidates(&["NOME", "First name"]),
            &candidates(&["EMAIL", "Email"]),
        )
        .unwrap();
        // "NOME" wins over "First name" even though "First name" also matches.
        assert_eq!(mapping.name_header, "NOME");
        assert_eq!(mapping.name_index, 1);
        // "EMAIL" is absent, so the second candidate matches.
        assert_eq!(mapping.email_header, "Email");
        assert_eq!(mapping.email_index, 0);
    }

    #[test]
    fn resolve_reports_missing_sides() {
        let header = headers(&["Phone", "City"]);
        let err = resolve(&header, &candidates(&["NOME"]), &candidates(&["EMAIL"])).unwrap_err();
        match err {
            Error::ColumnNotFound { missing } => assert_eq!(missing, "NAME, EMAIL"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn resolve_reports_single_missing_side() {
        let header = headers(&["NOME", "Phone"]);
        let err = resolve(&header, &candidates(&["NOME"]), &candidates(&["EMAIL"])).unwrap_err();
        match err {
            Error::ColumnNotFound { missing } => assert_eq!(missing, "EMAIL"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn extract_records_drops_incomplete_rows() {
        let mapping = ColumnMapping {
            name_index: 0,
            email_index: 2,
            name_header: "NOME".into(),
            email_header: "EMAIL".into(),
        };
        let rows = vec![
            vec!["Ana".into(), "x".into(), "ana@x.com".into()],
            vec!["Bo".into(), "x".into(), "  ".into()],
            vec!["".into(), "x".into(), "carl@x.com".into()],
            vec!["Dee".into()],
            vec!["Eli".into(), "x".into(), "eli@x.com".into()],
        ];
        let records = extract_records(&rows, &mapping);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].display_name, "Ana");
        assert_eq!(records[1].display_name, "Eli");
    }
}
