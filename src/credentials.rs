//! Service-account credential file parsing.
//!
//! Only the fields the pipeline needs are read; the token exchange
//! itself lives behind the sheets port.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// The subset of a service-account JSON file the pipeline consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCredentials {
    /// The service account's email, shown in permission-denied remediation.
    pub client_email: String,
    /// Project identifier, if present.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ServiceCredentials {
    /// Reads and parses a credential file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] if the file cannot be read, is not
    /// valid JSON, or lacks a non-empty `client_email`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Credential {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let creds: Self = serde_json::from_str(&contents).map_err(|e| Error::Credential {
            path: path.display().to_string(),
            message: format!("invalid JSON: {e}"),
        })?;
        if creds.client_email.trim().is_empty() {
            return Err(Error::Credential {
                path: path.display().to_string(),
                message: "missing 'client_email' field".to_string(),
            });
        }
        Ok(creds)
    }

    /// The service identity string attached to permission errors.
    ///
    /// Best effort: an unreadable credential file yields `None` rather
    /// than masking the error being reported.
    #[must_use]
    pub fn identity_of(path: &Path) -> Option<String> {
        Self::load(path).ok().map(|c| c.client_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("roster_credentials_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_reads_client_email() {
        let path = write_temp(
            "ok.json",
            r#"{"client_email": "svc@project.iam.gserviceaccount.com", "project_id": "project"}"#,
        );
        let creds = ServiceCredentials::load(&path).unwrap();
        assert_eq!(creds.client_email, "svc@project.iam.gserviceaccount.com");
        assert_eq!(creds.project_id.as_deref(), Some("project"));
    }

    #[test]
    fn load_rejects_missing_client_email() {
        let path = write_temp("empty.json", r#"{"client_email": ""}"#);
        let err = ServiceCredentials::load(&path).unwrap_err();
        assert!(err.to_string().contains("client_email"));
    }

    #[test]
    fn identity_of_missing_file_is_none() {
        let path = std::env::temp_dir().join("roster_credentials_test/absent.json");
        assert_eq!(ServiceCredentials::identity_of(&path), None);
    }
}
