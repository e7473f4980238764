//! In-memory record store.

use std::collections::HashMap;

use crate::error::StoreError;

use super::{key, RecordStore, StoreStats};

/// In-memory record store keyed by decimal frame-number strings.
///
/// The session-scoped default backend. Growth is unbounded for the
/// lifetime of the session; [`StoreStats`] exposes how much has
/// accumulated.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    bytes: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, frame_number: u64) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(&key(frame_number)).cloned())
    }

    fn put(&mut self, frame_number: u64, raw: &str) -> Result<(), StoreError> {
        if let Some(prev) = self.entries.insert(key(frame_number), raw.to_string()) {
            self.bytes -= prev.len() as u64;
        }
        self.bytes += raw.len() as u64;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.bytes = 0;
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            records: self.entries.len(),
            bytes: self.bytes,
        }
    }
}
