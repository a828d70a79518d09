//! QR scan intake.
//!
//! A scanned code carries a two-line payload, `"<name>\n<email>"`. Anything
//! else is ignored without complaint; a scanner failure is only logged.

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::prospect::Prospect;
use crate::store::ProspectStore;

/// Why a scan produced no text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The camera or decoder couldn't be used.
    #[error("scanner unavailable: {0}")]
    Unavailable(String),
    /// The scan was abandoned before a code was read.
    #[error("scan cancelled")]
    Cancelled,
}

/// Contact details decoded from a scan payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedContact {
    /// First line of the payload.
    pub name: String,
    /// Second line of the payload.
    pub email_address: String,
}

impl From<ScannedContact> for Prospect {
    fn from(contact: ScannedContact) -> Self {
        Prospect::new(contact.name, contact.email_address)
    }
}

/// Decode a scan payload.
///
/// Returns `None` unless the text splits on `'\n'` into exactly two segments.
#[must_use]
pub fn parse_scan(text: &str) -> Option<ScannedContact> {
    let mut segments = text.split('\n');
    let (Some(name), Some(email_address), None) =
        (segments.next(), segments.next(), segments.next())
    else {
        return None;
    };

    Some(ScannedContact {
        name: name.to_string(),
        email_address: email_address.to_string(),
    })
}

/// Feed a scanner result into the store.
///
/// Returns the id of the prospect that was added, if any.
pub fn handle_scan(
    store: &mut ProspectStore,
    result: std::result::Result<String, ScanError>,
) -> Option<Uuid> {
    let text = match result {
        Ok(text) => text,
        Err(err) => {
            warn!("Scanning failed: {}", err);
            return None;
        }
    };

    let Some(contact) = parse_scan(&text) else {
        debug!("Ignoring scan payload without exactly two lines");
        return None;
    };

    let prospect = Prospect::from(contact);
    let id = prospect.id();
    store.add(prospect);
    Some(id)
}
