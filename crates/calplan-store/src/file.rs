//! JSON file backend.
//!
//! The file holds `{"events": [...]}` with events in the camelCase wire
//! shape. It is read once on open and rewritten after every mutation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use calplan_core::{Event, EventDraft};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::memory::{EventStore, MemoryStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    events: Vec<Event>,
}

/// Events persisted to a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store; the file is created on the first
    /// mutation.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let events = match fs::read_to_string(&path) {
            Ok(contents) => {
                let file: StoreFile =
                    serde_json::from_str(&contents).map_err(|e| StoreError::json(&path, e))?;
                file.events
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file does not exist yet");
                Vec::new()
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        debug!(path = %path.display(), count = events.len(), "Opened event store");
        Ok(Self {
            path,
            inner: MemoryStore::with_seed(events),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `op` to a copy of the events, writes the copy, then keeps it.
    ///
    /// The in-memory state only changes when the write succeeds.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut MemoryStore) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut next = self.inner.clone();
        let result = op(&mut next)?;
        write_events(&self.path, next.events())?;
        self.inner = next;
        Ok(result)
    }
}

impl EventStore for JsonFileStore {
    fn events(&self) -> &[Event] {
        self.inner.events()
    }

    fn create(&mut self, draft: EventDraft) -> StoreResult<Event> {
        self.commit(|store| store.create(draft))
    }

    fn update(&mut self, id: &str, draft: EventDraft) -> StoreResult<Event> {
        self.commit(|store| store.update(id, draft))
    }

    fn delete(&mut self, id: &str) -> StoreResult<Event> {
        self.commit(|store| store.delete(id))
    }
}

/// Writes through a sibling temp file and renames it over `path`.
fn write_events(path: &Path, events: &[Event]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let file = StoreFile {
        events: events.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| StoreError::json(path, e))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;

    debug!(path = %path.display(), count = events.len(), "Wrote store file");
    Ok(())
}
