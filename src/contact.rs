//! The validated contact record type.

use serde::{Deserialize, Serialize};

/// A single contact read from the source file.
///
/// Construction validates the email so no empty identity can enter the
/// pipeline; identity comparisons go through [`ContactRecord::normalized_email`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// The contact's display name, carried verbatim from the source file.
    pub display_name: String,
    /// The contact's email address, carried verbatim from the source file.
    pub recipient_email: String,
}

impl ContactRecord {
    /// Creates a record, rejecting an empty or all-whitespace email.
    #[must_use]
    pub fn new(display_name: &str, recipient_email: &str) -> Option<Self> {
        if recipient_email.trim().is_empty() {
            return None;
        }
        Some(Self {
            display_name: display_name.to_string(),
            recipient_email: recipient_email.to_string(),
        })
    }

    /// The trimmed, lowercased email used for identity comparison.
    #[must_use]
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.recipient_email)
    }
}

/// Normalizes an email for identity comparison: trim, then lowercase.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_email() {
        assert!(ContactRecord::new("Ana", "").is_none());
        assert!(ContactRecord::new("Ana", "   ").is_none());
    }

    #[test]
    fn new_keeps_fields_verbatim() {
        let record = ContactRecord::new("Ana", " Ana@X.com ").unwrap();
        assert_eq!(record.display_name, "Ana");
        assert_eq!(record.recipient_email, " Ana@X.com ");
    }

    #[test]
    fn normalized_email_trims_and_lowercases() {
        let record = ContactRecord::new("Ana", " Ana@X.com ").unwrap();
        assert_eq!(record.normalized_email(), "ana@x.com");
    }

    #[test]
    fn same_identity_is_case_insensitive() {
        let a = ContactRecord::new("Ana", "ANA@x.com").unwrap();
        let b = ContactRecord::new("Other", "ana@X.COM").unwrap();
        assert_eq!(a.normalized_email(), b.normalized_email());
    }
}
