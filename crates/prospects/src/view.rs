//! Presentation derivations over the store.
//!
//! Nothing here mutates the store or caches results. A host recomputes the
//! visible list whenever the store reports a change.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::prospect::Prospect;

/// Which prospects a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Everyone in the store.
    #[default]
    Everyone,
    /// Only prospects that have been contacted.
    Contacted,
    /// Only prospects that haven't been contacted.
    Uncontacted,
}

impl FilterType {
    /// Title for a list using this filter.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Everyone => "Everyone",
            Self::Contacted => "Contacted people",
            Self::Uncontacted => "Uncontacted people",
        }
    }

    /// Check if `prospect` belongs in a list using this filter.
    #[must_use]
    pub fn matches(self, prospect: &Prospect) -> bool {
        match self {
            Self::Everyone => true,
            Self::Contacted => prospect.is_contacted(),
            Self::Uncontacted => !prospect.is_contacted(),
        }
    }

    /// Whether rows should carry a contacted/uncontacted badge.
    ///
    /// Filtered lists already imply the status.
    #[must_use]
    pub fn shows_status_badge(self) -> bool {
        self == Self::Everyone
    }
}

/// Ordering of a visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    /// Ascending by name, case-sensitive.
    #[default]
    Name,
    /// Newest first.
    Recent,
}

/// Something a user can do to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProspectAction {
    /// Remove the prospect.
    Delete,
    /// Mark as contacted.
    MarkContacted,
    /// Mark as not yet contacted.
    MarkUncontacted,
    /// Schedule a reminder to get in touch.
    RemindMe,
}

impl ProspectAction {
    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::MarkContacted => "Mark Contacted",
            Self::MarkUncontacted => "Mark Uncontacted",
            Self::RemindMe => "Remind Me",
        }
    }
}

/// Filter then sort `people` for display.
///
/// Sorting is stable, so equal names keep insertion order.
#[must_use]
pub fn visible(people: &[Prospect], filter: FilterType, sort: SortMethod) -> Vec<&Prospect> {
    let mut shown: Vec<&Prospect> = people.iter().filter(|p| filter.matches(p)).collect();
    match sort {
        SortMethod::Name => shown.sort_by(|a, b| a.name.cmp(&b.name)),
        SortMethod::Recent => shown.sort_by_key(|p| Reverse(p.date_created())),
    }
    shown
}

/// Actions offered for a row.
///
/// Reminders only make sense for people not yet contacted.
#[must_use]
pub fn actions_for(prospect: &Prospect) -> Vec<ProspectAction> {
    if prospect.is_contacted() {
        vec![ProspectAction::Delete, ProspectAction::MarkUncontacted]
    } else {
        vec![
            ProspectAction::Delete,
            ProspectAction::MarkContacted,
            ProspectAction::RemindMe,
        ]
    }
}
