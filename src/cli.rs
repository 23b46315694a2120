//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `roster`.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Reconcile a contact roster with a mail-merge spreadsheet")]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the source file's headers without loading row data.
    Validate {
        /// Source file to check; defaults to the configured one.
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Diff the source file against the destination sheet.
    Analyze,
    /// Apply the analysis result to the destination sheet.
    Sync {
        /// First record to apply (1-based, inclusive).
        #[arg(long)]
        start: Option<usize>,
        /// Last record to apply (1-based, inclusive).
        #[arg(long)]
        end: Option<usize>,
        /// Compute the would-be outcome without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Erase the destination sheet, keeping only its header.
    Clear {
        /// Answer the confirmation prompt with "yes".
        #[arg(long)]
        yes: bool,
    },
}
