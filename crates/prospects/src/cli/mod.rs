//! Command-line interface for prospects.
//!
//! This module provides the CLI structure for the `prospects` binary, which
//! drives the store the way a list UI would.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, FilterArg, ListCommand, RemindCommand, ScanCommand, SortArg,
    TargetCommand,
};

/// prospects - Keep track of who you've met and who you still need to call
///
/// Captures contacts from scanned QR payloads, marks them contacted, and
/// schedules reminders to follow up.
#[derive(Debug, Parser)]
#[command(name = "prospects")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List prospects
    List(ListCommand),

    /// Add a prospect from a scanned payload
    Scan(ScanCommand),

    /// Add a prospect by hand
    Add(AddCommand),

    /// Flip a prospect between contacted and uncontacted
    Toggle(TargetCommand),

    /// Delete a prospect
    Delete(TargetCommand),

    /// Schedule a reminder to contact a prospect
    Remind(RemindCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
