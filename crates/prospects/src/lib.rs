//! `prospects` - A file-backed tracker for sales prospects
//!
//! This library keeps an ordered list of people met in the field, captured
//! from scanned QR payloads, and tracks whether each has been contacted. The
//! list lives in memory and is saved as one JSON file after every change.
//! Presentation helpers derive filtered and sorted views, and reminders are
//! handed off to a pluggable scheduler.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prospect;
pub mod reminder;
pub mod scan;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use prospect::Prospect;
pub use reminder::{schedule_reminder, LocalScheduler, Reminder, ReminderScheduler};
pub use scan::{handle_scan, parse_scan, ScanError};
pub use store::{ProspectStore, StoreEvent};
pub use view::{actions_for, visible, FilterType, ProspectAction, SortMethod};
