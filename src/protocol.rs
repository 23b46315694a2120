//! Worker → consumer message protocol.
//!
//! Workers never touch presentation state; everything they have to say
//! travels through an ordered channel of [`Event`]s. The consumer drains
//! the channel until the worker's sender disconnects. Confirmation is
//! the one synchronous kind: the event carries a reply sender and the
//! worker blocks on the paired receiver until the caller decides.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::reconcile::Reconciliation;

/// Log line severity, rendered by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine progress information.
    Info,
    /// A completed step worth highlighting.
    Success,
    /// Something odd but not fatal.
    Warning,
    /// A failure.
    Error,
}

impl Severity {
    /// Fixed-width tag used in rendered log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

/// A message from a worker to the consumer.
#[derive(Debug)]
pub enum Event {
    /// A log line.
    Log {
        /// The message text.
        message: String,
        /// Rendering severity.
        severity: Severity,
    },
    /// A long-running step began; show its label.
    ProgressStart {
        /// Label describing the step.
        label: String,
    },
    /// The long-running step ended.
    ProgressStop,
    /// Whether the triggering controls should accept new actions.
    ButtonsEnabled(bool),
    /// A fresh analysis result (or the lack of one, after a failure).
    AnalysisUpdated {
        /// The owned result, handed off to the consumer; `None` resets
        /// the display after a failure or a completed sync.
        outcome: Option<Reconciliation>,
        /// One-line summary for the preview header.
        summary: String,
        /// Valid 1-based range bounds, when there is anything to select.
        range_bounds: Option<(usize, usize)>,
        /// Whether a sync can be started from this result.
        can_sync: bool,
    },
    /// Permission denied; carries the identity to grant access to.
    PermissionError {
        /// The service account's email.
        service_identity: String,
    },
    /// Blocking question; answer through `reply`.
    ConfirmationRequest {
        /// The question to put to the caller.
        question: String,
        /// One-shot reply channel; dropping it counts as a decline.
        reply: Sender<bool>,
    },
}

/// Creates the worker/consumer channel pair.
#[must_use]
pub fn channel() -> (EventSender, Receiver<Event>) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, rx)
}

/// Worker-side handle on the event channel.
///
/// Sends are fire-and-forget: a consumer that has gone away must not
/// bring the worker down mid-operation.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<Event>,
}

impl EventSender {
    /// Emits a log line.
    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        let _ = self.tx.send(Event::Log { message: message.into(), severity });
    }

    /// Emits a progress start marker.
    pub fn progress_start(&self, label: impl Into<String>) {
        let _ = self.tx.send(Event::ProgressStart { label: label.into() });
    }

    /// Emits a progress stop marker.
    pub fn progress_stop(&self) {
        let _ = self.tx.send(Event::ProgressStop);
    }

    /// Emits the control-state flag.
    pub fn buttons_enabled(&self, enabled: bool) {
        let _ = self.tx.send(Event::ButtonsEnabled(enabled));
    }

    /// Hands an analysis result (or a display reset) to the consumer.
    pub fn analysis_updated(&self, outcome: Option<Reconciliation>, summary: impl Into<String>) {
        let (range_bounds, can_sync) = match &outcome {
            Some(result) => (result.range_bounds(), !result.is_empty()),
            None => (None, false),
        };
        let _ = self.tx.send(Event::AnalysisUpdated {
            outcome,
            summary: summary.into(),
            range_bounds,
            can_sync,
        });
    }

    /// Emits the structured permission-denied follow-up.
    pub fn permission_error(&self, service_identity: impl Into<String>) {
        let _ =
            self.tx.send(Event::PermissionError { service_identity: service_identity.into() });
    }

    /// Asks the caller a yes/no question and blocks until the answer.
    ///
    /// Cooperative blocking on the reply receiver, no busy-wait. A
    /// disconnected consumer or a dropped reply sender counts as "no",
    /// so a dying caller can never green-light a destructive step.
    #[must_use]
    pub fn confirm(&self, question: impl Into<String>) -> bool {
        let (reply, answer) = mpsc::channel();
        if self
            .tx
            .send(Event::ConfirmationRequest { question: question.into(), reply })
            .is_err()
        {
            return false;
        }
        answer.recv().unwrap_or(false)
    }
}

/// Scope guard for one worker operation.
///
/// Emits `ButtonsEnabled(false)` + `ProgressStart` when created and the
/// terminating `ProgressStop` + `ButtonsEnabled(true)` pair when
/// dropped, so the finalization guarantee holds on every exit path.
pub struct OperationGuard {
    events: EventSender,
}

impl OperationGuard {
    /// Starts an operation scope.
    #[must_use]
    pub fn begin(events: &EventSender, label: &str) -> Self {
        events.buttons_enabled(false);
        events.progress_start(label);
        Self { events: events.clone() }
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.events.progress_stop();
        self.events.buttons_enabled(true);
    }
}
