//! Fixed display configuration.

/// Fixed parameters of a viewing session.
///
/// Supplied at construction, validated by the caller, and never auto-tuned
/// while the session runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Number of frame numbers materialized for display at a time.
    pub window_size: u64,

    /// Step by which the window shifts past a scroll boundary.
    pub jump_size: u64,

    /// Whether the window tracks the newest data at session start.
    pub autoscroll: bool,

    /// Upward scroll distance that must be exceeded before autoscroll is
    /// switched off. Filters out minor scroll jitter.
    pub scroll_hysteresis: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_size: 50,
            jump_size: 20,
            autoscroll: true,
            scroll_hysteresis: 5.0,
        }
    }
}
