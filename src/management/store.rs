use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::warn;

use crate::types::{Entry, Lifecycle, Snapshot};

#[derive(Debug, Default)]
struct Entries {
    ordered: Vec<Entry>,
    positions: HashMap<String, usize>,
}

/// In-memory lifecycle records of the current working set, in input order.
///
/// Every mutation is keyed by id and simply overwrites what the id holds, so
/// results may land in any order. Updates for ids that are not in the store,
/// such as a single retry settling after `clear`, are dropped. Readers only
/// ever get clones.
///
/// `seed` and `clear` must not be called while a batch is in flight.
#[derive(Debug, Default)]
pub struct EntryStore {
    inner: RwLock<Entries>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the store with one pending entry per id. Repeated ids keep
    /// their first position.
    pub fn seed<S: AsRef<str>>(&self, ids: &[S]) {
        let mut entries = Entries::default();
        for id in ids {
            let id = id.as_ref();
            if entries.positions.contains_key(id) {
                continue;
            }
            entries
                .positions
                .insert(id.to_string(), entries.ordered.len());
            entries.ordered.push(Entry::pending(id));
        }

        *self.write() = entries;
    }

    pub fn begin_loading(&self, id: &str) {
        self.set(id, Lifecycle::Loading);
    }

    pub fn complete_success(&self, id: &str, snapshot: Snapshot) {
        self.set(id, Lifecycle::Success(snapshot));
    }

    pub fn complete_failure(&self, id: &str, message: impl Into<String>) {
        self.set(id, Lifecycle::Failed(message.into()));
    }

    pub fn clear(&self) {
        *self.write() = Entries::default();
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.read().ordered.clone()
    }

    pub fn get(&self, id: &str) -> Option<Entry> {
        let entries = self.read();
        entries
            .positions
            .get(id)
            .map(|&pos| entries.ordered[pos].clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().positions.contains_key(id)
    }

    pub fn failed_ids(&self) -> Vec<String> {
        self.read()
            .ordered
            .iter()
            .filter(|e| e.is_failed())
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&self, id: &str, lifecycle: Lifecycle) {
        let mut entries = self.write();
        match entries.positions.get(id).copied() {
            Some(pos) => entries.ordered[pos].lifecycle = lifecycle,
            None => warn!(id, "dropping lifecycle update for an id not in the store"),
        }
    }

    // Every critical section is a plain assignment, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
