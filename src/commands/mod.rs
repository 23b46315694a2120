//! Command dispatch and handlers.
//!
//! Each handler plays the consumer role of the worker protocol: it
//! spawns the worker thread for its action, drains the event channel,
//! renders log lines, answers confirmation requests, and prints the
//! analysis preview.

pub mod analyze;
pub mod clear;
pub mod sync;
pub mod validate;

use std::io::Write as _;
use std::sync::mpsc::Receiver;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::protocol::{Event, Severity};
use crate::reconcile::Reconciliation;
use crate::worker::{AnalysisRequest, Connection};

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the configuration cannot be loaded or the
/// selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::load_or_create(&cli.config).map_err(|e| e.to_string())?;
    match &cli.command {
        Command::Validate { source } => validate::run(&settings, source.as_deref()),
        Command::Analyze => analyze::run(&settings),
        Command::Sync { start, end, dry_run } => sync::run(&settings, *start, *end, *dry_run),
        Command::Clear { yes } => clear::run(&settings, *yes),
    }
}

/// Builds the remote connection parameters from the configuration.
pub(crate) fn connection_from(settings: &Settings) -> Connection {
    Connection {
        credential_path: settings.user_settings.credential_path.clone().into(),
        remote_locator: settings.user_settings.remote_locator.clone(),
    }
}

/// Builds a full analysis request from the configuration.
pub(crate) fn analysis_request_from(settings: &Settings) -> AnalysisRequest {
    AnalysisRequest {
        connection: connection_from(settings),
        source_path: settings.user_settings.source_file_path.clone().into(),
        name_candidates: settings.app_settings.candidate_name_columns.clone(),
        email_candidates: settings.app_settings.candidate_email_columns.clone(),
    }
}

/// What draining one worker's channel produced.
pub(crate) struct Drained {
    /// The most recent analysis result handed over, if any.
    pub analysis: Option<Reconciliation>,
    /// Error-severity log messages, in arrival order.
    pub errors: Vec<String>,
}

impl Drained {
    /// Converts the drain into the command's exit result.
    pub fn into_result(self) -> Result<(), String> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(first),
        }
    }
}

/// Drains events until the worker disconnects.
///
/// Confirmation requests are answered from stdin, or affirmatively when
/// `assume_yes` is set.
pub(crate) fn drain_events(rx: &Receiver<Event>, assume_yes: bool) -> Drained {
    let mut drained = Drained { analysis: None, errors: Vec::new() };
    for event in rx.iter() {
        match event {
            Event::Log { message, severity } => {
                if severity == Severity::Error {
                    drained.errors.push(message.clone());
                }
                render_log(&message, severity);
            }
            Event::ProgressStart { label } => println!("--- {label}"),
            Event::ProgressStop | Event::ButtonsEnabled(_) => {}
            Event::AnalysisUpdated { outcome, summary, .. } => {
                if outcome.is_some() {
                    drained.analysis = outcome;
                } else if drained.analysis.is_none() {
                    render_log(&summary, Severity::Info);
                }
            }
            Event::PermissionError { service_identity } => {
                render_permission_help(&service_identity);
            }
            Event::ConfirmationRequest { question, reply } => {
                let answer = if assume_yes {
                    render_log("Confirmation skipped (--yes).", Severity::Info);
                    true
                } else {
                    prompt_yes_no(&question)
                };
                let _ = reply.send(answer);
            }
        }
    }
    drained
}

/// Renders one log line with a timestamp and severity tag.
pub(crate) fn render_log(message: &str, severity: Severity) {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    if severity == Severity::Error {
        eprintln!("[{timestamp}] {:7} {message}", severity.as_str());
    } else {
        println!("[{timestamp}] {:7} {message}", severity.as_str());
    }
}

fn render_permission_help(service_identity: &str) {
    eprintln!("The service account has no access to the destination sheet.");
    eprintln!("To fix it, open the spreadsheet and share it with:");
    eprintln!("    {service_identity}");
    eprintln!("setting the permission to 'Editor'.");
}

fn prompt_yes_no(question: &str) -> bool {
    print!("{question} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints the analysis preview table with 1-based record indices.
pub(crate) fn print_preview(result: &Reconciliation) {
    println!();
    println!("{}", result.summary());
    for (position, record) in result.new_contacts().iter().enumerate() {
        println!("{:>5}  {:<32} {}", position + 1, record.display_name, record.recipient_email);
    }
}
