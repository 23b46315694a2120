//! `roster clear` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::worker;

use super::{connection_from, drain_events};

/// Execute the `clear` command.
///
/// # Errors
///
/// Returns an error string if the reset fails.
pub fn run(settings: &Settings, assume_yes: bool) -> Result<(), String> {
    run_with_context(ServiceContext::live(), settings, assume_yes)
}

/// Execute the `clear` command with an explicit service context.
///
/// # Errors
///
/// Returns an error string if the reset fails.
pub fn run_with_context(
    ctx: ServiceContext,
    settings: &Settings,
    assume_yes: bool,
) -> Result<(), String> {
    let connection = connection_from(settings);
    let (rx, handle) = worker::spawn(move |events| worker::run_reset(&ctx, &connection, events));
    let drained = drain_events(&rx, assume_yes);
    handle.join().map_err(|_| "clear worker panicked".to_string())?;
    drained.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::adapters::memory::{MemorySource, MemoryWorksheet};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn settings_with_credentials(name: &str) -> Settings {
        let dir = std::env::temp_dir().join("roster_clear_cmd_test");
        std::fs::create_dir_all(&dir).unwrap();
        let credential: PathBuf = dir.join(name);
        std::fs::write(&credential, r#"{"client_email": "svc@x.iam.gserviceaccount.com"}"#)
            .unwrap();

        let mut settings = Settings::default();
        settings.user_settings.credential_path = credential.display().to_string();
        settings.user_settings.remote_locator = "sheet-1".to_string();
        settings
    }

    #[test]
    fn clear_with_yes_erases_and_keeps_the_header() {
        let settings = settings_with_credentials("yes.json");
        let worksheet = Arc::new(MemoryWorksheet::with_rows(
            strings(&["First name", "Last name", "Recipient"]),
            vec![strings(&["Ana", "", "ana@x.com"])],
        ));
        let ctx = ServiceContext::in_memory(Arc::clone(&worksheet), MemorySource::default());

        assert!(run_with_context(ctx, &settings, true).is_ok());
        assert_eq!(
            worksheet.rows_snapshot(),
            vec![strings(&["First name", "Last name", "Recipient"])]
        );
    }

    #[test]
    fn clear_on_empty_sheet_is_a_no_op() {
        let settings = settings_with_credentials("noop.json");
        let worksheet =
            Arc::new(MemoryWorksheet::with_rows(strings(&["Recipient"]), Vec::new()));
        let ctx = ServiceContext::in_memory(Arc::clone(&worksheet), MemorySource::default());

        assert!(run_with_context(ctx, &settings, true).is_ok());
        assert!(worksheet.calls().is_empty());
    }

    #[test]
    fn clear_without_connection_settings_fails() {
        let settings = Settings::default();
        let ctx = ServiceContext::in_memory(
            Arc::new(MemoryWorksheet::empty()),
            MemorySource::default(),
        );
        let result = run_with_context(ctx, &settings, true);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("required"));
    }
}
