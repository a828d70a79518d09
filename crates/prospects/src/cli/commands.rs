//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::view::{FilterType, SortMethod};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Which prospects to show
    #[arg(short, long, value_enum, default_value = "everyone")]
    pub filter: FilterArg,

    /// Sort order
    #[arg(short, long, value_enum, default_value = "name")]
    pub sort: SortArg,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Scan command arguments.
#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Scanned payload ("<name>\n<email>"); read from stdin when omitted
    pub text: Option<String>,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Prospect name
    pub name: String,

    /// Prospect email address
    #[arg(default_value = "")]
    pub email: String,
}

/// Arguments for commands acting on one prospect.
#[derive(Debug, Args)]
pub struct TargetCommand {
    /// Prospect id
    pub id: Uuid,
}

/// Remind command arguments.
#[derive(Debug, Args)]
pub struct RemindCommand {
    /// Prospect id
    pub id: Uuid,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Filter argument for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Everyone
    Everyone,
    /// Contacted people
    Contacted,
    /// Uncontacted people
    Uncontacted,
}

impl From<FilterArg> for FilterType {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Everyone => Self::Everyone,
            FilterArg::Contacted => Self::Contacted,
            FilterArg::Uncontacted => Self::Uncontacted,
        }
    }
}

/// Sort argument for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// By name
    Name,
    /// By most recent
    Recent,
}

impl From<SortArg> for SortMethod {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => Self::Name,
            SortArg::Recent => Self::Recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_arg_conversion() {
        assert_eq!(FilterType::from(FilterArg::Everyone), FilterType::Everyone);
        assert_eq!(FilterType::from(FilterArg::Contacted), FilterType::Contacted);
        assert_eq!(
            FilterType::from(FilterArg::Uncontacted),
            FilterType::Uncontacted
        );
    }

    #[test]
    fn test_sort_arg_conversion() {
        assert_eq!(SortMethod::from(SortArg::Name), SortMethod::Name);
        assert_eq!(SortMethod::from(SortArg::Recent), SortMethod::Recent);
    }
}
