//! Session-scoped persistence seam and the selection state store built on it.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::{CommittedSelection, StageKey};
use crate::error::{CascadeError, CascadeResult};

/// Key-value scope with session lifetime, injected by the host.
///
/// Access is synchronous and local; the active page is the single reader and
/// writer.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// HashMap-backed store for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Sole owner of the persisted committed selection.
///
/// Holds one record under one key; the record is either a complete selection
/// (every stage's ID and name) or absent. Partial data is never stored.
#[derive(Debug)]
pub struct SelectionStateStore<S: SessionStore> {
    store: S,
    storage_key: String,
    stage_keys: Vec<StageKey>,
}

impl<S: SessionStore> SelectionStateStore<S> {
    #[must_use]
    pub fn new(store: S, storage_key: impl Into<String>, stage_keys: Vec<StageKey>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
            stage_keys,
        }
    }

    /// Persists a complete selection.
    ///
    /// A selection that does not cover every configured stage clears the key
    /// instead of writing.
    pub fn commit(&mut self, selection: &CommittedSelection) -> CascadeResult<()> {
        if !selection.covers(self.stage_keys.iter()) {
            self.store.remove(&self.storage_key);
            let missing = self
                .stage_keys
                .iter()
                .filter(|key| selection.get(key).is_none())
                .cloned()
                .collect();
            return Err(CascadeError::SelectionIncomplete { missing });
        }

        let payload = serde_json::to_string(&selection.to_record()).map_err(|e| {
            CascadeError::InvalidData(format!("failed to serialize session record: {e}"))
        })?;
        self.store.set(&self.storage_key, &payload);
        debug!(key = %self.storage_key, "committed selection persisted");
        Ok(())
    }

    /// Loads the persisted committed selection.
    ///
    /// A structurally incomplete or unparsable record is treated as corrupt
    /// and purged as a side effect; the purge is permanent.
    pub fn load(&mut self) -> Option<CommittedSelection> {
        let payload = self.store.get(&self.storage_key)?;
        let record: serde_json::Value = match serde_json::from_str(&payload) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "purging unparsable session record");
                self.store.remove(&self.storage_key);
                return None;
            }
        };
        match CommittedSelection::from_record(&record, self.stage_keys.iter()) {
            Ok(selection) => Some(selection),
            Err(err) => {
                warn!(error = %err, "purging structurally incomplete session record");
                self.store.remove(&self.storage_key);
                None
            }
        }
    }

    /// Removes the persisted committed selection unconditionally.
    pub fn clear(&mut self) {
        self.store.remove(&self.storage_key);
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    #[must_use]
    pub fn session_store(&self) -> &S {
        &self.store
    }

    pub fn session_store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
