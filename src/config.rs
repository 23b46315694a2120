//! Persisted JSON configuration surface.
//!
//! The pipeline only reads this structure; creating or saving the file
//! is the CLI layer's responsibility. Loading tolerates files written by
//! older versions: missing sections and fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Full configuration file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Per-user state: paths, locators, theme.
    #[serde(default)]
    pub user_settings: UserSettings,
    /// Application-level knobs: candidate columns, template URL.
    #[serde(default)]
    pub app_settings: AppSettings,
}

/// Per-user settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Path to the service-account credential file.
    #[serde(default)]
    pub credential_path: String,
    /// Locator (URL or ID) of the destination spreadsheet.
    #[serde(default)]
    pub remote_locator: String,
    /// Path to the local contact source file.
    #[serde(default)]
    pub source_file_path: String,
    /// Presentation theme name, kept for config-file compatibility.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Previously used destination locators, most recent first.
    #[serde(default)]
    pub saved_remote_locators: Vec<String>,
}

/// Application settings shared by all users of a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// URL offering a copy of the destination sheet template.
    #[serde(default = "default_template_url")]
    pub template_url: String,
    /// Candidate source headers for the name column, in priority order.
    #[serde(default = "default_name_columns")]
    pub candidate_name_columns: Vec<String>,
    /// Candidate source headers for the email column, in priority order.
    #[serde(default = "default_email_columns")]
    pub candidate_email_columns: Vec<String>,
}

fn default_theme() -> String {
    "superhero".to_string()
}

fn default_template_url() -> String {
    "https://docs.google.com/spreadsheets/d/1w8bnEEei0U5fYcOJXfA7ItdyXxnUGnQGJ4vFZrZE04Q/copy"
        .to_string()
}

fn default_name_columns() -> Vec<String> {
    ["NOME", "First name", "Name", "Nome"].map(String::from).to_vec()
}

fn default_email_columns() -> Vec<String> {
    ["EMAIL", "Last name", "Email", "E-mail", "E-MAIL", "EMAIL(MINUSCULOS)"]
        .map(String::from)
        .to_vec()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            credential_path: String::new(),
            remote_locator: String::new(),
            source_file_path: String::new(),
            theme: default_theme(),
            saved_remote_locators: Vec::new(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            template_url: default_template_url(),
            candidate_name_columns: default_name_columns(),
            candidate_email_columns: default_email_columns(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { user_settings: UserSettings::default(), app_settings: AppSettings::default() }
    }
}

impl Settings {
    /// Loads settings from `path`, creating the file with defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file exists but cannot be read or
    /// parsed, or if the default file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&contents).map_err(|e| Error::Config {
            message: format!("cannot parse {}: {e}", path.display()),
        })
    }

    /// Saves settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Config {
            message: format!("cannot serialize settings: {e}"),
        })?;
        std::fs::write(path, json).map_err(|e| Error::Config {
            message: format!("cannot write {}: {e}", path.display()),
        })
    }
}
