//! File-backed prospect store.
//!
//! The whole collection lives in memory and is written out as a single JSON
//! array after every mutation. Writes go to a temporary file in the target
//! directory which is then renamed over the saved file, so a reader sees
//! either the previous collection or the new one, never a torn write.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::prospect::Prospect;

/// Capacity of the change-event channel. Slow subscribers lag, they don't block.
const EVENT_CAPACITY: usize = 64;

/// A committed change to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A prospect was appended.
    Added(Uuid),
    /// A prospect's contacted flag changed to `is_contacted`.
    Toggled {
        /// The prospect that changed.
        id: Uuid,
        /// Its new flag value.
        is_contacted: bool,
    },
    /// A prospect was removed.
    Deleted(Uuid),
}

/// The in-memory, file-backed collection of prospects.
#[derive(Debug)]
pub struct ProspectStore {
    /// Path to the saved collection.
    path: PathBuf,
    /// Records in insertion order.
    people: Vec<Prospect>,
    /// Change notifications, sent after each mutation commits.
    events: broadcast::Sender<StoreEvent>,
}

impl ProspectStore {
    /// Open the store saved at `path`.
    ///
    /// A missing, unreadable, or undecodable file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let people = Self::load(&path);
        info!(
            "Opened prospect store at {} with {} records",
            path.display(),
            people.len()
        );

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            path,
            people,
            events,
        }
    }

    fn load(path: &Path) -> Vec<Prospect> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("Starting empty, could not read {}: {}", path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(people) => people,
            Err(err) => {
                warn!("Starting empty, could not decode {}: {}", path.display(), err);
                Vec::new()
            }
        }
    }

    /// Get the path to the saved collection.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All prospects in insertion order.
    #[must_use]
    pub fn people(&self) -> &[Prospect] {
        &self.people
    }

    /// Look up a prospect by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Prospect> {
        self.people.iter().find(|p| p.id() == id)
    }

    /// Number of prospects held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Check if the store holds no prospects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Subscribe to change notifications.
    ///
    /// Events are sent after the in-memory change commits and the save has
    /// been attempted.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Append a prospect and save.
    ///
    /// Ids are not checked for duplicates.
    pub fn add(&mut self, prospect: Prospect) {
        let id = prospect.id();
        self.people.push(prospect);
        debug!("Added prospect {}", id);
        self.save_or_log();
        self.notify(StoreEvent::Added(id));
    }

    /// Flip the contacted flag of the stored record matching `prospect`.
    ///
    /// Returns the new flag value, or `None` if no record matched, in which
    /// case nothing is saved.
    pub fn toggle(&mut self, prospect: &Prospect) -> Option<bool> {
        let record = self.people.iter_mut().find(|p| p.id() == prospect.id())?;
        record.is_contacted = !record.is_contacted;
        let is_contacted = record.is_contacted;
        let id = record.id();

        debug!("Prospect {} contacted: {}", id, is_contacted);
        self.save_or_log();
        self.notify(StoreEvent::Toggled { id, is_contacted });
        Some(is_contacted)
    }

    /// Remove the first record matching `prospect`.
    ///
    /// Returns `true` if a record was removed. Saves only on a match.
    pub fn delete(&mut self, prospect: &Prospect) -> bool {
        let Some(index) = self.people.iter().position(|p| p == prospect) else {
            return false;
        };

        let removed = self.people.remove(index);
        debug!("Deleted prospect {}", removed.id());
        self.save_or_log();
        self.notify(StoreEvent::Deleted(removed.id()));
        true
    }

    /// Write the whole collection to disk, replacing the saved file atomically.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written or
    /// moved into place.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|source| Error::DirectoryCreate {
                path: dir.clone(),
                source,
            })?;
        }

        let data = serde_json::to_vec(&self.people)?;

        let write_err = |source| Error::Write {
            path: self.path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(&data).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|err| Error::Persist {
            path: self.path.clone(),
            source: err.error,
        })?;

        debug!(
            "Saved {} prospects to {}",
            self.people.len(),
            self.path.display()
        );
        Ok(())
    }

    fn save_or_log(&self) {
        if let Err(err) = self.save() {
            error!("Unable to save prospects: {}", err);
        }
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
