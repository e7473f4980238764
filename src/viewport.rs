//! Viewport controller: the sliding display window, autoscroll, and row
//! selection.
//!
//! The controller is a state machine over `{Empty, Tracking}`. It starts
//! with no window; the first record accepted by the ledger establishes one,
//! and from then on the window only slides. All handlers are explicit and
//! run to completion on the session's event thread; the controller never
//! reads the store itself. It is told the ledger's current bounds on every
//! call and must never move the window outside them.

use tracing::debug;

use crate::config::ViewConfig;
use crate::ledger::Bounds;
use crate::record::PacketRecord;

/// Scroll geometry reported by the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top of the content.
    pub scroll_top: f64,
    /// Total scrollable content height.
    pub scroll_height: f64,
    /// Visible viewport height.
    pub client_height: f64,
}

impl ScrollMetrics {
    fn at_top(&self) -> bool {
        self.scroll_top == 0.0
    }

    fn at_bottom(&self) -> bool {
        (self.scroll_height - self.scroll_top).round() == self.client_height
    }
}

/// Presentation-facing side effect of a window adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Bring the first visible row into view, aligned to the top.
    FirstRowIntoView,
    /// Bring the last visible row into view, aligned to the bottom.
    LastRowIntoView,
}

/// Inclusive range of frame numbers materialized for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

/// The currently selected row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedRow {
    pub frame_number: u64,
    pub record: PacketRecord,
}

/// Window, autoscroll, and selection state for one viewing session.
pub struct ViewportController {
    config: ViewConfig,
    window: Option<Window>,
    autoscroll: bool,
    prev_scroll_top: f64,
    selection: Option<SelectedRow>,
}

impl ViewportController {
    /// Create a controller in the Empty state.
    pub fn new(config: ViewConfig) -> Self {
        Self {
            autoscroll: config.autoscroll,
            config,
            window: None,
            prev_scroll_top: 0.0,
            selection: None,
        }
    }

    /// Current window, or `None` while no record has arrived.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Whether the window is tracking the newest data.
    pub fn autoscroll(&self) -> bool {
        self.autoscroll
    }

    /// Flip autoscroll. The window itself does not move until the next
    /// new-max notification applies the new state.
    pub fn toggle_autoscroll(&mut self) {
        self.autoscroll = !self.autoscroll;
    }

    /// Currently selected row, if any.
    pub fn selection(&self) -> Option<&SelectedRow> {
        self.selection.as_ref()
    }

    /// Transition Empty -> Tracking once the ledger has accepted its first
    /// record.
    ///
    /// `first_frame` is the frame number of that record; `bounds` are the
    /// ledger bounds after the whole arrival batch was appended, so the
    /// window end lands on `first_frame + window_size` when the batch
    /// reaches that far and on the observed maximum otherwise. A second
    /// call is ignored; the window only slides after this point.
    pub fn establish(&mut self, first_frame: u64, bounds: Bounds) {
        if self.window.is_some() {
            return;
        }
        let Bounds::Observed { max, .. } = bounds else {
            return;
        };
        self.window = Some(Window {
            start: first_frame,
            end: max.min(first_frame.saturating_add(self.config.window_size)),
        });
    }

    /// React to the ledger's maximum frame number increasing.
    ///
    /// With autoscroll on, the window snaps to the newest data and the
    /// presentation is asked to bring the last row into view. With
    /// autoscroll off the window is untouched; new data accumulates in the
    /// ledger without being displayed.
    pub fn on_new_max(&mut self, new_max: u64, bounds: Bounds) -> Option<ScrollRequest> {
        self.window?;
        let Bounds::Observed { min, .. } = bounds else {
            return None;
        };
        if !self.autoscroll {
            return None;
        }
        self.window = Some(Window {
            start: min.max(new_max.saturating_sub(self.config.window_size)),
            end: new_max,
        });
        Some(ScrollRequest::LastRowIntoView)
    }

    /// React to a scroll position report from the presentation layer.
    ///
    /// Scrolling upward by more than the hysteresis threshold switches
    /// autoscroll off. Hitting the top boundary slides the window back by
    /// the jump size, hitting the bottom boundary slides it forward, both
    /// clamped to the ledger bounds. When the whole window fits on screen
    /// both boundary checks hold at once; the top jump takes priority.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, bounds: Bounds) -> Option<ScrollRequest> {
        if metrics.scroll_top < self.prev_scroll_top
            && self.prev_scroll_top - metrics.scroll_top > self.config.scroll_hysteresis
        {
            self.autoscroll = false;
        }
        self.prev_scroll_top = metrics.scroll_top;

        let window = self.window?;
        let Bounds::Observed { min, max } = bounds else {
            return None;
        };
        let jump = self.config.jump_size;

        if metrics.at_top() {
            debug!(start = window.start, "scroll begin");
            self.window = Some(match window.start.checked_sub(jump) {
                Some(start) if start >= min => Window {
                    start,
                    end: window.end - jump,
                },
                // Underflow past the oldest data: pin to the minimum and
                // compute the end from that anchor.
                _ => Window {
                    start: min,
                    end: max.min(min.saturating_add(self.config.window_size)),
                },
            });
            Some(ScrollRequest::FirstRowIntoView)
        } else if metrics.at_bottom() {
            debug!(end = window.end, "scroll end");
            let end = window.end.saturating_add(jump);
            self.window = Some(if end > max {
                // Overflow past the newest data: pin to the maximum and
                // compute the start from that anchor.
                Window {
                    start: min.max(max.saturating_sub(self.config.window_size)),
                    end: max,
                }
            } else {
                Window {
                    start: window.start.saturating_add(jump),
                    end,
                }
            });
            Some(ScrollRequest::LastRowIntoView)
        } else {
            None
        }
    }

    /// Select or deselect a row.
    ///
    /// Clicking the selected row again clears the selection; clicking any
    /// other row replaces it. Returns the selection after the change so the
    /// caller can fan it out synchronously.
    pub fn select_row(&mut self, frame_number: u64, record: PacketRecord) -> Option<&SelectedRow> {
        match &self.selection {
            Some(selected) if selected.frame_number == frame_number => {
                self.selection = None;
            }
            _ => {
                self.selection = Some(SelectedRow {
                    frame_number,
                    record,
                });
            }
        }
        self.selection.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frame: u64) -> PacketRecord {
        PacketRecord::parse(&format!(r#"{{"frame":{{"frame.number":"{frame}"}}}}"#)).unwrap()
    }

    fn config() -> ViewConfig {
        ViewConfig {
            window_size: 50,
            jump_size: 20,
            autoscroll: true,
            scroll_hysteresis: 5.0,
        }
    }

    fn tracking(window: Window) -> ViewportController {
        let mut controller = ViewportController::new(config());
        controller.window = Some(window);
        controller
    }

    fn metrics(scroll_top: f64) -> ScrollMetrics {
        // Tall content, nowhere near either boundary unless scroll_top is 0.
        ScrollMetrics {
            scroll_top,
            scroll_height: 5000.0,
            client_height: 400.0,
        }
    }

    #[test]
    fn test_establish_with_batch_reaching_past_window() {
        let mut controller = ViewportController::new(config());
        controller.establish(100, Bounds::Observed { min: 100, max: 200 });

        assert_eq!(controller.window(), Some(Window { start: 100, end: 150 }));
    }

    #[test]
    fn test_establish_with_single_record_clamps_to_max() {
        let mut controller = ViewportController::new(config());
        controller.establish(100, Bounds::Observed { min: 100, max: 100 });

        assert_eq!(controller.window(), Some(Window { start: 100, end: 100 }));
    }

    #[test]
    fn test_establish_only_once() {
        let mut controller = ViewportController::new(config());
        controller.establish(100, Bounds::Observed { min: 100, max: 200 });
        controller.establish(300, Bounds::Observed { min: 100, max: 400 });

        assert_eq!(controller.window(), Some(Window { start: 100, end: 150 }));
    }

    #[test]
    fn test_new_max_with_autoscroll_tracks_tail() {
        // Scenario: window [100,150], autoscroll on, frame 200 arrives.
        let mut controller = tracking(Window { start: 100, end: 150 });

        let request = controller.on_new_max(200, Bounds::Observed { min: 100, max: 200 });

        assert_eq!(request, Some(ScrollRequest::LastRowIntoView));
        assert_eq!(controller.window(), Some(Window { start: 150, end: 200 }));
    }

    #[test]
    fn test_new_max_near_start_clamps_to_min() {
        let mut controller = tracking(Window { start: 100, end: 110 });

        controller.on_new_max(120, Bounds::Observed { min: 100, max: 120 });

        // 120 - 50 underflows past the minimum; start pins there.
        assert_eq!(controller.window(), Some(Window { start: 100, end: 120 }));
    }

    #[test]
    fn test_new_max_with_autoscroll_off_is_inert() {
        let mut controller = tracking(Window { start: 100, end: 150 });
        controller.toggle_autoscroll();

        let request = controller.on_new_max(200, Bounds::Observed { min: 100, max: 200 });

        assert_eq!(request, None);
        assert_eq!(controller.window(), Some(Window { start: 100, end: 150 }));
    }

    #[test]
    fn test_upward_scroll_past_hysteresis_disables_autoscroll() {
        // Scenario: prev position 20, new position 10, delta 10 > 5.
        let bounds = Bounds::Observed { min: 100, max: 500 };
        let mut controller = tracking(Window { start: 100, end: 150 });

        controller.on_scroll(metrics(20.0), bounds);
        assert!(controller.autoscroll());

        controller.on_scroll(metrics(10.0), bounds);
        assert!(!controller.autoscroll());
    }

    #[test]
    fn test_upward_scroll_within_hysteresis_keeps_autoscroll() {
        let bounds = Bounds::Observed { min: 100, max: 500 };
        let mut controller = tracking(Window { start: 100, end: 150 });

        controller.on_scroll(metrics(20.0), bounds);
        // A drop of exactly the threshold is jitter, not intent.
        controller.on_scroll(metrics(15.0), bounds);

        assert!(controller.autoscroll());
    }

    #[test]
    fn test_scroll_top_jumps_window_back() {
        let bounds = Bounds::Observed { min: 100, max: 500 };
        let mut controller = tracking(Window { start: 200, end: 250 });

        let request = controller.on_scroll(metrics(0.0), bounds);

        assert_eq!(request, Some(ScrollRequest::FirstRowIntoView));
        assert_eq!(controller.window(), Some(Window { start: 180, end: 230 }));
    }

    #[test]
    fn test_scroll_top_clamps_at_min() {
        // Scenario: window [100,150], min 100, jump 20; 80 < 100 clamps.
        let bounds = Bounds::Observed { min: 100, max: 500 };
        let mut controller = tracking(Window { start: 100, end: 150 });

        controller.on_scroll(metrics(0.0), bounds);

        assert_eq!(controller.window(), Some(Window { start: 100, end: 150 }));
    }

    #[test]
    fn test_scroll_top_clamp_respects_small_capture() {
        // Fewer frames than one window: the clamped end stops at max.
        let bounds = Bounds::Observed { min: 100, max: 130 };
        let mut controller = tracking(Window { start: 105, end: 130 });

        controller.on_scroll(metrics(0.0), bounds);

        assert_eq!(controller.window(), Some(Window { start: 100, end: 130 }));
    }

    #[test]
    fn test_scroll_bottom_jumps_window_forward() {
        let bounds = Bounds::Observed { min: 100, max: 500 };
        let mut controller = tracking(Window { start: 200, end: 250 });

        let at_bottom = ScrollMetrics {
            scroll_top: 4600.0,
            scroll_height: 5000.0,
            client_height: 400.0,
        };
        let request = controller.on_scroll(at_bottom, bounds);

        assert_eq!(request, Some(ScrollRequest::LastRowIntoView));
        assert_eq!(controller.window(), Some(Window { start: 220, end: 270 }));
    }

    #[test]
    fn test_scroll_bottom_clamps_at_max() {
        let bounds = Bounds::Observed { min: 100, max: 260 };
        let mut controller = tracking(Window { start: 200, end: 250 });

        let at_bottom = ScrollMetrics {
            scroll_top: 4600.0,
            scroll_height: 5000.0,
            client_height: 400.0,
        };
        controller.on_scroll(at_bottom, bounds);

        // 250 + 20 exceeds 260; end pins to max and start is derived from it.
        assert_eq!(controller.window(), Some(Window { start: 210, end: 260 }));
    }

    #[test]
    fn test_whole_window_on_screen_top_takes_priority() {
        // scroll_top == 0 and round(scroll_height - 0) == client_height:
        // both boundaries hold, the top jump must win deterministically.
        let bounds = Bounds::Observed { min: 100, max: 500 };
        let mut controller = tracking(Window { start: 300, end: 350 });

        let degenerate = ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 400.0,
            client_height: 400.0,
        };
        let request = controller.on_scroll(degenerate, bounds);

        assert_eq!(request, Some(ScrollRequest::FirstRowIntoView));
        assert_eq!(controller.window(), Some(Window { start: 280, end: 330 }));
    }

    #[test]
    fn test_scroll_before_first_record_is_inert() {
        let mut controller = ViewportController::new(config());
        let request = controller.on_scroll(metrics(0.0), Bounds::Empty);
        assert_eq!(request, None);
        assert_eq!(controller.window(), None);
    }

    #[test]
    fn test_window_stays_inside_bounds_across_slides() {
        let bounds = Bounds::Observed { min: 100, max: 180 };
        let mut controller = tracking(Window { start: 120, end: 170 });

        let at_bottom = ScrollMetrics {
            scroll_top: 4600.0,
            scroll_height: 5000.0,
            client_height: 400.0,
        };
        for _ in 0..4 {
            controller.on_scroll(at_bottom, bounds);
            let window = controller.window().unwrap();
            assert!(window.start >= 100 && window.end <= 180);
            assert!(window.start <= window.end);
        }
        for _ in 0..6 {
            controller.on_scroll(metrics(0.0), bounds);
            controller.on_scroll(metrics(1.0), bounds);
            let window = controller.window().unwrap();
            assert!(window.start >= 100 && window.end <= 180);
            assert!(window.start <= window.end);
        }
    }

    #[test]
    fn test_selection_toggles_on_repeat_click() {
        let mut controller = ViewportController::new(config());

        assert!(controller.select_row(3, record(3)).is_some());
        assert!(controller.select_row(3, record(3)).is_none());
        assert!(controller.selection().is_none());
    }

    #[test]
    fn test_selection_replaces_on_other_row() {
        let mut controller = ViewportController::new(config());

        controller.select_row(3, record(3));
        let selected = controller.select_row(5, record(5)).unwrap();

        assert_eq!(selected.frame_number, 5);
    }
}
