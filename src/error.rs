//! Error taxonomy shared by the pipeline and its adapters.
//!
//! Remote-touching code classifies failures into three kinds (network,
//! permission, generic API) at the adapter boundary; validation errors
//! are resolved locally and never reach the remote store.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the pipeline can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// None of the configured candidate names matched a source header.
    #[error("source file is missing required column(s): {missing}")]
    ColumnNotFound {
        /// Human-readable list of the missing sides (e.g. "NAME, EMAIL").
        missing: String,
    },

    /// The destination sheet lacks the required recipient column.
    #[error("the destination sheet must have a header column named '{header}'")]
    SchemaViolation {
        /// The exact header that was expected.
        header: String,
    },

    /// A range selection violated `1 <= start <= end <= len`.
    #[error("invalid range {start}..={end} over {len} row(s)")]
    InvalidRange {
        /// Requested 1-based start.
        start: usize,
        /// Requested 1-based inclusive end.
        end: usize,
        /// Length of the reconciliation result the range was applied to.
        len: usize,
    },

    /// The sync executor was handed an empty selection.
    #[error("no new contacts to sync")]
    NothingToSync,

    /// Transport-level connectivity failure.
    #[error("network failure contacting the spreadsheet API: {message}")]
    Network {
        /// Transport error description.
        message: String,
    },

    /// The remote API denied the service account access.
    #[error("permission denied for the service account ({status})")]
    PermissionDenied {
        /// The API's structured status code (e.g. `PERMISSION_DENIED`).
        status: String,
    },

    /// Any other remote API failure, surfaced as kind + message.
    #[error("spreadsheet API error {status}: {message}")]
    Api {
        /// HTTP or API status.
        status: String,
        /// The API's error message.
        message: String,
    },

    /// Required configuration is missing or unreadable.
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// The credential file could not be read or parsed.
    #[error("credential file '{path}': {message}")]
    Credential {
        /// Path to the offending file.
        path: String,
        /// What was wrong.
        message: String,
    },

    /// The source file could not be read or parsed.
    #[error("cannot read source file '{path}': {message}")]
    Source {
        /// Path to the offending file.
        path: String,
        /// What was wrong.
        message: String,
    },

    /// The source file has an extension no reader recognizes.
    #[error("unsupported source file '{path}' (expected a .csv file)")]
    UnsupportedSource {
        /// Path to the offending file.
        path: String,
    },
}

impl Error {
    /// Whether this error is resolved locally, before any remote call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::ColumnNotFound { .. }
                | Error::InvalidRange { .. }
                | Error::NothingToSync
                | Error::Config { .. }
                | Error::Credential { .. }
                | Error::Source { .. }
                | Error::UnsupportedSource { .. }
        )
    }

    /// Short kind label used when rendering generic failures.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ColumnNotFound { .. } => "ColumnNotFound",
            Error::SchemaViolation { .. } => "SchemaViolation",
            Error::InvalidRange { .. } => "InvalidRange",
            Error::NothingToSync => "NothingToSync",
            Error::Network { .. } => "Network",
            Error::PermissionDenied { .. } => "PermissionDenied",
            Error::Api { .. } => "Api",
            Error::Config { .. } => "Config",
            Error::Credential { .. } => "Credential",
            Error::Source { .. } => "Source",
            Error::UnsupportedSource { .. } => "UnsupportedSource",
        }
    }
}
