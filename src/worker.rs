//! Worker operations.
//!
//! Each user-initiated action runs one of these on its own thread, one
//! worker per action. Workers talk to the consumer exclusively through
//! the event channel, classify remote failures into the three recovery
//! paths, and always terminate with the `ProgressStop` +
//! `ButtonsEnabled(true)` pair via [`OperationGuard`].

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use crate::contact::ContactRecord;
use crate::context::ServiceContext;
use crate::credentials::ServiceCredentials;
use crate::error::{Error, Result};
use crate::executor::{self, SyncMode, SyncOutcome};
use crate::ports::Worksheet;
use crate::protocol::{channel, Event, EventSender, OperationGuard, Severity};
use crate::reconcile::{diff, identity, mapping, Reconciliation};
use crate::reset::{reset_sheet, ResetOutcome};

/// Connection parameters shared by all remote-touching operations.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Path to the service-account credential file.
    pub credential_path: PathBuf,
    /// Locator (URL or ID) of the destination spreadsheet.
    pub remote_locator: String,
}

impl Connection {
    fn validated(&self) -> Result<()> {
        if self.credential_path.as_os_str().is_empty() || self.remote_locator.trim().is_empty() {
            return Err(Error::Config {
                message: "the credential file and sheet locator are both required".to_string(),
            });
        }
        Ok(())
    }

    /// Best-effort service identity for permission-denied reporting.
    fn identity(&self) -> Option<String> {
        ServiceCredentials::identity_of(&self.credential_path)
    }
}

/// Everything one analysis pass needs.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Remote connection parameters.
    pub connection: Connection,
    /// Path to the local contact source file.
    pub source_path: PathBuf,
    /// Candidate name headers, in priority order.
    pub name_candidates: Vec<String>,
    /// Candidate email headers, in priority order.
    pub email_candidates: Vec<String>,
}

/// Everything one sync pass needs.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Remote connection parameters (unused in simulate mode).
    pub connection: Connection,
    /// Simulate instead of committing.
    pub simulate: bool,
    /// The (possibly range-selected, possibly edited) records to apply.
    pub selection: Vec<ContactRecord>,
}

/// Spawns a worker thread wired to a fresh event channel.
///
/// The consumer drains the returned receiver until it disconnects,
/// which happens when the worker finishes and drops its sender.
pub fn spawn<F>(job: F) -> (Receiver<Event>, JoinHandle<()>)
where
    F: FnOnce(&EventSender) + Send + 'static,
{
    let (events, rx) = channel();
    let handle = thread::spawn(move || job(&events));
    (rx, handle)
}

/// Header pre-validation pass: checks the source file's columns without
/// loading any row data and without touching the remote store.
pub fn validate_source(
    ctx: &ServiceContext,
    source_path: &Path,
    name_candidates: &[String],
    email_candidates: &[String],
    events: &EventSender,
) {
    if source_path.as_os_str().is_empty() {
        return;
    }
    let outcome = ctx
        .source
        .read_headers(source_path)
        .and_then(|headers| mapping::resolve(&headers, name_candidates, email_candidates));
    match outcome {
        Ok(_) => events.log(Severity::Success, "Contact file validated successfully!"),
        Err(err @ Error::ColumnNotFound { .. }) => {
            events.log(Severity::Warning, err.to_string());
        }
        Err(err) => {
            events.log(Severity::Error, format!("Could not read the contact file: {err}"));
        }
    }
}

/// Full analysis pass: builds the identity set, diffs the source
/// against it, and hands the owned result to the consumer.
pub fn run_analysis(ctx: &ServiceContext, request: &AnalysisRequest, events: &EventSender) {
    let _guard = OperationGuard::begin(events, "Analyzing contacts...");
    events.log(Severity::Info, "Starting the analysis...");

    match analyze(ctx, request, events) {
        Ok(result) => {
            events.log(Severity::Success, "Analysis complete.");
            if result.is_empty() {
                events.log(Severity::Warning, "No new contacts to add.");
            }
            let summary = result.summary();
            events.analysis_updated(Some(result), summary);
        }
        Err(err) => {
            report_failure(events, &err, request.connection.identity());
            events.analysis_updated(None, "Analysis failed. Check the log.");
        }
    }
}

fn analyze(
    ctx: &ServiceContext,
    request: &AnalysisRequest,
    events: &EventSender,
) -> Result<Reconciliation> {
    if request.source_path.as_os_str().is_empty() {
        return Err(Error::Config {
            message: "the credential file, sheet locator, and source file are all required"
                .to_string(),
        });
    }
    request.connection.validated()?;

    let sheet = open_sheet(ctx, &request.connection, events)?;

    events.log(Severity::Info, "Optimization: reading only the existing recipient column...");
    let existing = identity::fetch(sheet.as_ref())?;
    events.log(Severity::Info, format!("Found {} unique contacts in the sheet.", existing.len()));

    events.log(Severity::Info, "Reading the source file...");
    let (headers, rows) = ctx.source.read_records(&request.source_path)?;
    events.log(Severity::Info, format!("Found {} contacts in the file.", rows.len()));

    let mapping =
        mapping::resolve(&headers, &request.name_candidates, &request.email_candidates)?;
    events.log(
        Severity::Info,
        format!(
            "Mapping: '{}' -> First name, '{}' -> Recipient.",
            mapping.name_header, mapping.email_header
        ),
    );

    let records = mapping::extract_records(&rows, &mapping);
    let new_contacts = diff::filter_new(records, &existing);
    Ok(Reconciliation::new(new_contacts, rows.len(), existing.len()))
}

/// Sync pass: applies (or simulates) the given selection, then resets
/// the consumer's analysis display.
pub fn run_sync(ctx: &ServiceContext, request: &SyncRequest, events: &EventSender) {
    let _guard = OperationGuard::begin(events, "Syncing contacts...");
    let label = if request.simulate { "simulation" } else { "synchronization" };
    events.log(Severity::Info, format!("Starting the {label}..."));

    match sync(ctx, request, events) {
        Ok(SyncOutcome { rows, simulated: true }) => {
            events.log(Severity::Success, format!("SIMULATION MODE: {rows} row(s) would be added."));
        }
        Ok(SyncOutcome { rows, simulated: false }) => {
            events.log(Severity::Success, format!("SUCCESS! {rows} new row(s) added."));
        }
        Err(err) => report_failure(events, &err, request.connection.identity()),
    }

    events.analysis_updated(None, "Run a new analysis to continue.");
    events.log(Severity::Info, "Process finished.");
}

fn sync(ctx: &ServiceContext, request: &SyncRequest, events: &EventSender) -> Result<SyncOutcome> {
    if request.selection.is_empty() {
        return Err(Error::NothingToSync);
    }
    events.log(
        Severity::Info,
        format!("Preparing to add {} contact(s)...", request.selection.len()),
    );

    if request.simulate {
        return executor::execute(&request.selection, SyncMode::Simulate);
    }

    request.connection.validated()?;
    events.log(Severity::Info, "Connecting to write the data...");
    let sheet = open_sheet(ctx, &request.connection, events)?;
    events.log(Severity::Info, "Appending the new rows...");
    executor::execute(&request.selection, SyncMode::Commit(sheet.as_ref()))
}

/// Destructive reset pass: confirm with the caller, then clear the
/// sheet and restore only its header.
pub fn run_reset(ctx: &ServiceContext, connection: &Connection, events: &EventSender) {
    let _guard = OperationGuard::begin(events, "Checking/clearing the sheet...");
    events.log(Severity::Info, "Starting the sheet check/clear...");

    match reset(ctx, connection, events) {
        Ok(ResetOutcome::AlreadyEmpty) => {
            events.log(Severity::Info, "The destination sheet is already empty. Nothing to clear.");
        }
        Ok(ResetOutcome::Declined { .. }) => {
            events.log(Severity::Warning, "Clearing cancelled by the caller.");
        }
        Ok(ResetOutcome::Cleared { .. }) => {
            events.log(Severity::Success, "Sheet cleared successfully. Header kept.");
        }
        Err(err) => report_failure(events, &err, connection.identity()),
    }
}

fn reset(
    ctx: &ServiceContext,
    connection: &Connection,
    events: &EventSender,
) -> Result<ResetOutcome> {
    connection.validated()?;
    let sheet = open_sheet(ctx, connection, events)?;
    reset_sheet(sheet.as_ref(), |rows| {
        events.log(Severity::Warning, format!("The sheet contains {rows} record(s)."));
        let confirmed = events.confirm(format!(
            "The destination sheet contains {rows} record(s). Erase ALL data (keeping the header)?"
        ));
        if confirmed {
            events.log(Severity::Info, "Caller confirmed the clear. Erasing data...");
        }
        confirmed
    })
}

fn open_sheet(
    ctx: &ServiceContext,
    connection: &Connection,
    events: &EventSender,
) -> Result<Box<dyn Worksheet>> {
    events.log(Severity::Info, "Authenticating with the service account...");
    let session = ctx.sheets.authenticate(&connection.credential_path)?;
    events.log(Severity::Info, "Opening the spreadsheet...");
    let sheet = session.open_by_locator(&connection.remote_locator)?;
    events.log(Severity::Success, format!("Connected to spreadsheet: '{}'", sheet.title()));
    Ok(sheet)
}

/// Routes a failure onto one of the three recovery paths.
///
/// Classification inspects the structured error kind, never the message
/// text. Permission failures are the only kind with a structured
/// follow-up event; validation failures were resolved before any remote
/// call and get a single log line.
fn report_failure(events: &EventSender, err: &Error, identity: Option<String>) {
    match err {
        Error::Network { .. } => {
            events.log(
                Severity::Error,
                "Network failure contacting the spreadsheet API. Check your internet connection.",
            );
        }
        Error::PermissionDenied { .. } => {
            events.log(Severity::Error, "Permission denied for the service account.");
            events.permission_error(identity.unwrap_or_default());
        }
        err if err.is_validation() => events.log(Severity::Error, err.to_string()),
        err => events.log(Severity::Error, format!("{} - {err}", err.kind())),
    }
}
