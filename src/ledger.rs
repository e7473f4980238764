//! Append-only packet ledger.
//!
//! The ledger owns a [`RecordStore`] for the lifetime of a viewing session
//! and tracks the smallest and largest frame numbers it has accepted. It is
//! the sole mutator of the store; the viewport controller only reads from
//! it. Frame numbers are unique but not necessarily contiguous or arriving
//! in order, so the store is sparse and bounds only ever widen.

use tracing::warn;

use crate::error::StoreError;
use crate::record::PacketRecord;
use crate::store::RecordStore;

/// Observed frame-number bounds of a ledger.
///
/// `Empty` is the explicit sentinel for a ledger that has accepted nothing
/// yet; once a record lands the bounds are concrete and `min <= max` holds
/// from then on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bounds {
    /// No record has been accepted yet.
    Empty,
    /// At least one record accepted; both endpoints inclusive.
    Observed { min: u64, max: u64 },
}

impl Bounds {
    fn observe(&mut self, frame: u64) {
        *self = match *self {
            Bounds::Empty => Bounds::Observed {
                min: frame,
                max: frame,
            },
            Bounds::Observed { min, max } => Bounds::Observed {
                min: min.min(frame),
                max: max.max(frame),
            },
        };
    }

    /// Smallest observed frame number, if any.
    pub fn min(&self) -> Option<u64> {
        match self {
            Bounds::Empty => None,
            Bounds::Observed { min, .. } => Some(*min),
        }
    }

    /// Largest observed frame number, if any.
    pub fn max(&self) -> Option<u64> {
        match self {
            Bounds::Empty => None,
            Bounds::Observed { max, .. } => Some(*max),
        }
    }
}

/// Frame-number-indexed record ledger.
pub struct PacketLedger<S: RecordStore> {
    store: S,
    bounds: Bounds,
}

impl<S: RecordStore> PacketLedger<S> {
    /// Create an empty ledger over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            bounds: Bounds::Empty,
        }
    }

    /// Append a serialized record.
    ///
    /// Returns the frame number of the stored record, or `Ok(None)` when the
    /// record cannot be parsed into a frame number: such records are dropped
    /// and logged, never fatal. A store failure is surfaced to the caller
    /// and leaves the bounds untouched, so the bounds never claim a frame
    /// the store did not accept.
    pub fn append(&mut self, raw: &str) -> Result<Option<u64>, StoreError> {
        let record = match PacketRecord::parse(raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "dropping record without a usable frame number");
                return Ok(None);
            }
        };

        let frame = record.frame_number;
        // Persist first; bounds advance only for records that actually landed.
        self.store.put(frame, raw)?;
        self.bounds.observe(frame);
        Ok(Some(frame))
    }

    /// Get the record stored for a frame.
    ///
    /// `Ok(None)` for frame numbers never written (holes in a sparse
    /// sequence are expected, not errors).
    pub fn get(&self, frame_number: u64) -> Result<Option<PacketRecord>, StoreError> {
        match self.store.get(frame_number)? {
            None => Ok(None),
            Some(raw) => Ok(reparse(frame_number, &raw)),
        }
    }

    /// Lazily iterate records with frame numbers in `[start, end]`,
    /// ascending, skipping absent keys. Restartable.
    pub fn range(
        &self,
        start: u64,
        end: u64,
    ) -> impl Iterator<Item = Result<(u64, PacketRecord), StoreError>> + '_ {
        self.store.range(start, end).filter_map(|item| match item {
            Ok((frame, raw)) => reparse(frame, &raw).map(|record| Ok((frame, record))),
            Err(err) => Some(Err(err)),
        })
    }

    /// Empty the store and reset the bounds sentinel. Idempotent.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.bounds = Bounds::Empty;
        Ok(())
    }

    /// Current observed bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Statistics of the backing store.
    pub fn stats(&self) -> crate::store::StoreStats {
        self.store.stats()
    }
}

/// Re-parse stored text. Every stored record parsed at append time, so a
/// failure here means the backend returned something it was never given;
/// treat it as a hole rather than propagating a fatal error.
fn reparse(frame: u64, raw: &str) -> Option<PacketRecord> {
    match PacketRecord::parse(raw) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(frame, %err, "stored record no longer parses, skipping");
            None
        }
    }
}
