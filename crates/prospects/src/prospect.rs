//! The prospect record.
//!
//! A [`Prospect`] is a plain value: who the person is, when they were added,
//! and whether they've been contacted yet. Equality is identity, so two
//! records with the same `id` compare equal even if their fields differ.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name given to prospects created without one.
pub const DEFAULT_NAME: &str = "Anonymous";

/// A tracked contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    /// Unique identifier, assigned at creation.
    id: Uuid,

    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Contact email.
    #[serde(default)]
    pub email_address: String,

    /// When this record was created.
    date_created: DateTime<Utc>,

    /// Whether follow-up has happened. Only the store flips this.
    #[serde(default)]
    pub(crate) is_contacted: bool,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl Prospect {
    /// Create a new, uncontacted prospect with the given details.
    #[must_use]
    pub fn new(name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email_address: email_address.into(),
            date_created: Utc::now(),
            is_contacted: false,
        }
    }

    /// The prospect's identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the prospect was created.
    #[must_use]
    pub fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }

    /// Whether the prospect has been contacted.
    #[must_use]
    pub fn is_contacted(&self) -> bool {
        self.is_contacted
    }
}

impl Default for Prospect {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, String::new())
    }
}

impl PartialEq for Prospect {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Prospect {}
