//! `roster validate` command.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::worker;

use super::drain_events;

/// Execute the `validate` command.
///
/// # Errors
///
/// Returns an error string if no source file is available or the file
/// cannot be read.
pub fn run(settings: &Settings, source_override: Option<&Path>) -> Result<(), String> {
    run_with_context(ServiceContext::live(), settings, source_override)
}

/// Execute the `validate` command with an explicit service context.
///
/// # Errors
///
/// Returns an error string if no source file is available or the file
/// cannot be read.
pub fn run_with_context(
    ctx: ServiceContext,
    settings: &Settings,
    source_override: Option<&Path>,
) -> Result<(), String> {
    let source_path: PathBuf = match source_override {
        Some(path) => path.to_path_buf(),
        None => settings.user_settings.source_file_path.clone().into(),
    };
    if source_path.as_os_str().is_empty() {
        return Err(
            "no source file to validate; pass --source or set source_file_path".to_string()
        );
    }

    let name_candidates = settings.app_settings.candidate_name_columns.clone();
    let email_candidates = settings.app_settings.candidate_email_columns.clone();
    let (rx, handle) = worker::spawn(move |events| {
        worker::validate_source(&ctx, &source_path, &name_candidates, &email_candidates, events);
    });
    let drained = drain_events(&rx, false);
    handle.join().map_err(|_| "validate worker panicked".to_string())?;
    drained.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::memory::{MemorySource, MemoryWorksheet};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn validate_without_any_source_is_an_error() {
        let settings = Settings::default();
        let ctx = ServiceContext::in_memory(
            Arc::new(MemoryWorksheet::empty()),
            MemorySource::default(),
        );
        let result = run_with_context(ctx, &settings, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--source"));
    }

    #[test]
    fn validate_accepts_a_matching_header() {
        let settings = Settings::default();
        let ctx = ServiceContext::in_memory(
            Arc::new(MemoryWorksheet::empty()),
            MemorySource::new(strings(&["NOME", "EMAIL"]), Vec::new()),
        );
        let result = run_with_context(ctx, &settings, Some(Path::new("contacts.csv")));
        assert!(result.is_ok());
    }
}
