//! Core library entry for the `roster` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contact;
pub mod context;
pub mod credentials;
pub mod error;
pub mod executor;
pub mod ports;
pub mod protocol;
pub mod reconcile;
pub mod reset;
pub mod worker;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["roster", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_validate_with_fresh_config_and_no_source_fails_cleanly() {
        let dir = std::env::temp_dir().join("roster_lib_run_test");
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("config.json");
        let _ = std::fs::remove_file(&config);

        let result = run(["roster", "validate", "--config", config.to_str().unwrap()]);
        assert!(result.is_err());
        // The default config file was created on first use.
        assert!(config.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
