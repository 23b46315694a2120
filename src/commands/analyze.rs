//! `roster analyze` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::worker;

use super::{analysis_request_from, drain_events, print_preview};

/// Execute the `analyze` command.
///
/// # Errors
///
/// Returns an error string if the analysis fails.
pub fn run(settings: &Settings) -> Result<(), String> {
    run_with_context(ServiceContext::live(), settings)
}

/// Execute the `analyze` command with an explicit service context.
///
/// # Errors
///
/// Returns an error string if the analysis fails.
pub fn run_with_context(ctx: ServiceContext, settings: &Settings) -> Result<(), String> {
    let request = analysis_request_from(settings);
    let (rx, handle) = worker::spawn(move |events| worker::run_analysis(&ctx, &request, events));
    let drained = drain_events(&rx, false);
    handle.join().map_err(|_| "analysis worker panicked".to_string())?;

    if let Some(result) = &drained.analysis {
        print_preview(result);
    }
    drained.into_result()
}
