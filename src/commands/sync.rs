//! `roster sync` command.
//!
//! Runs a fresh analysis (each run discards any previous result), lets
//! the caller narrow it to a 1-based inclusive range, then applies or
//! simulates the append. Two workers run back to back, one per stage,
//! never concurrently.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::protocol::Severity;
use crate::reconcile::range;
use crate::worker::{self, SyncRequest};

use super::{analysis_request_from, connection_from, drain_events, render_log};

/// Execute the `sync` command.
///
/// # Errors
///
/// Returns an error string if the analysis, range selection, or sync
/// fails.
pub fn run(
    settings: &Settings,
    start: Option<usize>,
    end: Option<usize>,
    dry_run: bool,
) -> Result<(), String> {
    run_with_contexts(ServiceContext::live(), ServiceContext::live(), settings, start, end, dry_run)
}

/// Execute the `sync` command with explicit service contexts, one per
/// worker stage.
///
/// # Errors
///
/// Returns an error string if the analysis, range selection, or sync
/// fails.
pub fn run_with_contexts(
    analysis_ctx: ServiceContext,
    sync_ctx: ServiceContext,
    settings: &Settings,
    start: Option<usize>,
    end: Option<usize>,
    dry_run: bool,
) -> Result<(), String> {
    let request = analysis_request_from(settings);
    let (rx, handle) =
        worker::spawn(move |events| worker::run_analysis(&analysis_ctx, &request, events));
    let mut drained = drain_events(&rx, false);
    handle.join().map_err(|_| "analysis worker panicked".to_string())?;

    let Some(result) = drained.analysis.take() else {
        return drained.into_result().and(Err("analysis produced no result".to_string()));
    };
    if result.is_empty() {
        // Nothing new; the analysis worker already logged the warning.
        return Ok(());
    }

    let start = start.unwrap_or(1);
    let end = end.unwrap_or(result.len());
    let selection = match range::select(result.new_contacts(), start, end) {
        Ok(selection) => selection.to_vec(),
        Err(err) => {
            render_log(&err.to_string(), Severity::Error);
            return Err(err.to_string());
        }
    };

    let request = SyncRequest {
        connection: connection_from(settings),
        simulate: dry_run,
        selection,
    };
    let (rx, handle) = worker::spawn(move |events| worker::run_sync(&sync_ctx, &request, events));
    let drained = drain_events(&rx, false);
    handle.join().map_err(|_| "sync worker panicked".to_string())?;
    drained.into_result()
}
