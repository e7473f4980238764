//! Record store abstraction.
//!
//! The ledger persists every record it accepts into a key-value store keyed
//! by frame number. The store is an injected capability rather than a
//! process-wide singleton so the ledger can be exercised against an
//! in-memory fake, and so persistent backends can surface their failures
//! through a common error type.
//!
//! Keys are the decimal string form of the frame number and values are the
//! original serialized record text, stored verbatim: reading a key back
//! must return bytes identical to what was written.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;

/// Encode a frame number as its store key.
pub fn key(frame_number: u64) -> String {
    frame_number.to_string()
}

/// Key-value store for serialized packet records.
///
/// Frame sequences are sparse: `get` on a never-written key is `Ok(None)`,
/// a normal outcome the caller must tolerate, not an error. A duplicate
/// `put` overwrites (last-write-wins).
pub trait RecordStore {
    /// Get the record text stored for a frame, if any.
    fn get(&self, frame_number: u64) -> Result<Option<String>, StoreError>;

    /// Store record text for a frame, overwriting any prior value.
    fn put(&mut self, frame_number: u64, raw: &str) -> Result<(), StoreError>;

    /// Remove every stored record.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Number of stored records.
    fn len(&self) -> usize;

    /// Whether the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage statistics for monitoring.
    fn stats(&self) -> StoreStats;

    /// Lazily iterate stored records with frame numbers in `[start, end]`,
    /// ascending, skipping absent keys.
    ///
    /// The iterator is finite and restartable: each call walks the range
    /// afresh. A read failure ends the iteration after yielding the error.
    fn range(&self, start: u64, end: u64) -> RangeIter<'_, Self>
    where
        Self: Sized,
    {
        RangeIter::new(self, start, end)
    }
}

/// Lazy ascending iterator over a frame-number range of a store.
pub struct RangeIter<'a, S: RecordStore> {
    store: &'a S,
    cursor: u64,
    end: u64,
    finished: bool,
}

impl<'a, S: RecordStore> RangeIter<'a, S> {
    fn new(store: &'a S, start: u64, end: u64) -> Self {
        Self {
            store,
            cursor: start,
            end,
            finished: start > end,
        }
    }
}

impl<S: RecordStore> Iterator for RangeIter<'_, S> {
    type Item = Result<(u64, String), StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            let frame = self.cursor;
            if frame == self.end {
                self.finished = true;
            } else {
                self.cursor += 1;
            }
            match self.store.get(frame) {
                Ok(Some(raw)) => return Some(Ok((frame, raw))),
                Ok(None) => continue,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Store statistics for monitoring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of stored records.
    pub records: usize,
    /// Total bytes of stored record text.
    pub bytes: u64,
}
