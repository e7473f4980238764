//! Viewing session: the owning event loop around ledger and viewport.
//!
//! A session receives every inbound event (record arrivals from the
//! transport, scroll and click signals from the presentation) and drives
//! ledger and viewport in strict arrival order on a single thread.
//! Transport and presentation stay external: the transport only calls
//! [`PacketSession::on_record_arrived`], the presentation only the
//! `on_*` handlers and the read-only accessors.

use tracing::debug;

use crate::config::ViewConfig;
use crate::error::StoreError;
use crate::ledger::{Bounds, PacketLedger};
use crate::record::PacketRecord;
use crate::store::{RecordStore, StoreStats};
use crate::viewport::{ScrollMetrics, ScrollRequest, SelectedRow, ViewportController, Window};

/// Consumer of selection changes (the detail view in the original UI).
///
/// Notified synchronously after every selection update, so it never
/// observes stale state.
pub trait SelectionSink {
    fn selection_changed(&mut self, selection: Option<&SelectedRow>);
}

/// One viewing session over a record store.
pub struct PacketSession<S: RecordStore> {
    config: ViewConfig,
    ledger: PacketLedger<S>,
    viewport: ViewportController,
    sink: Option<Box<dyn SelectionSink>>,
}

impl<S: RecordStore> PacketSession<S> {
    /// Create a session over an empty store.
    pub fn new(config: ViewConfig, store: S) -> Self {
        Self {
            config,
            ledger: PacketLedger::new(store),
            viewport: ViewportController::new(config),
            sink: None,
        }
    }

    /// Register the consumer of selection changes.
    pub fn set_selection_sink(&mut self, sink: Box<dyn SelectionSink>) {
        self.sink = Some(sink);
    }

    /// Handle a single arrived record.
    pub fn on_record_arrived(&mut self, raw: &str) -> Result<Option<ScrollRequest>, StoreError> {
        self.on_batch_arrived(std::iter::once(raw))
    }

    /// Handle an ordered batch of arrived records.
    ///
    /// Each record is appended in the given order; the viewport is driven
    /// once after the whole batch, so a burst of arrivals produces a single
    /// window adjustment. A store failure aborts the batch and is returned
    /// to the caller; records appended before the failure remain tracked,
    /// and the next event observes consistent bounds.
    pub fn on_batch_arrived<'a>(
        &mut self,
        batch: impl IntoIterator<Item = &'a str>,
    ) -> Result<Option<ScrollRequest>, StoreError> {
        let prev_max = self.ledger.bounds().max();
        let mut first_stored = None;
        for raw in batch {
            if let Some(frame) = self.ledger.append(raw)? {
                first_stored.get_or_insert(frame);
            }
        }

        let bounds = self.ledger.bounds();
        if let Some(first) = first_stored {
            self.viewport.establish(first, bounds);
        }

        let request = match (bounds.max(), prev_max) {
            (Some(max), Some(prev)) if max > prev => self.viewport.on_new_max(max, bounds),
            (Some(max), None) => self.viewport.on_new_max(max, bounds),
            _ => None,
        };
        Ok(request)
    }

    /// Handle a scroll position report from the presentation layer.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<ScrollRequest> {
        self.viewport.on_scroll(metrics, self.ledger.bounds())
    }

    /// Flip autoscroll.
    pub fn on_toggle_autoscroll(&mut self) {
        self.viewport.toggle_autoscroll();
    }

    /// Handle a row click: toggle or replace the selection and fan the
    /// change out to the registered sink before returning.
    pub fn on_row_click(&mut self, frame_number: u64, record: PacketRecord) {
        let selection = self.viewport.select_row(frame_number, record);
        if let Some(sink) = &mut self.sink {
            sink.selection_changed(selection);
        }
    }

    /// Current window bounds, or `None` while no record has arrived.
    pub fn window(&self) -> Option<Window> {
        self.viewport.window()
    }

    /// Lazily iterate the rows of the current window in ascending frame
    /// order, absent frames skipped. Empty before the first record arrives.
    pub fn visible_rows(
        &self,
    ) -> impl Iterator<Item = Result<(u64, PacketRecord), StoreError>> + '_ {
        let (start, end) = match self.viewport.window() {
            Some(window) => (window.start, window.end),
            // Inverted range: yields nothing.
            None => (1, 0),
        };
        self.ledger.range(start, end)
    }

    /// Whether the window is tracking the newest data.
    pub fn autoscroll(&self) -> bool {
        self.viewport.autoscroll()
    }

    /// Currently selected row, if any.
    pub fn selection(&self) -> Option<&SelectedRow> {
        self.viewport.selection()
    }

    /// Observed frame-number bounds of the ledger.
    pub fn bounds(&self) -> Bounds {
        self.ledger.bounds()
    }

    /// Statistics of the backing store.
    pub fn stats(&self) -> StoreStats {
        self.ledger.stats()
    }

    /// The session configuration.
    pub fn config(&self) -> ViewConfig {
        self.config
    }

    /// End the session: flush the persistence layer and reset window,
    /// selection, and autoscroll to their initial state. Idempotent; the
    /// flushed records are not recoverable.
    pub fn close(&mut self) -> Result<(), StoreError> {
        debug!("clearing record store");
        self.ledger.clear()?;
        self.viewport = ViewportController::new(self.config);
        Ok(())
    }
}
