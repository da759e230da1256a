/*!
 * Timing transforms bound to a configuration.
 *
 * `TimingService` is the entry point for callers that want the configured
 * defaults (CPS, duration bounds, fps, gap limits) instead of passing every
 * parameter by hand.
 */

use super::transforms::{self, AutoDurationOptions, ShiftOptions};
use super::{TimedLine, Timestamp};
use crate::app_config::TimingConfig;

/// Runs timing transforms with a fixed set of defaults
#[derive(Debug, Clone, Default)]
pub struct TimingService {
    config: TimingConfig,
}

impl TimingService {
    /// Create a service with the standard defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with custom defaults
    pub fn with_config(config: TimingConfig) -> Self {
        Self { config }
    }

    /// The defaults in use
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Shift both endpoints of every line
    pub fn shift<L: TimedLine>(&self, lines: &mut [L], offset: Timestamp) {
        transforms::shift_timing(lines, offset, ShiftOptions::default());
    }

    /// Shift with explicit endpoint selection
    pub fn shift_with<L: TimedLine>(&self, lines: &mut [L], offset: Timestamp, options: ShiftOptions) {
        transforms::shift_timing(lines, offset, options);
    }

    pub fn scale<L: TimedLine>(&self, lines: &mut [L], scale_factor: f64, reference_time: Timestamp) {
        transforms::scale_timing(lines, scale_factor, reference_time);
    }

    pub fn stretch<L: TimedLine>(&self, lines: &mut [L], new_start: Timestamp, new_end: Timestamp) {
        transforms::stretch_timing(lines, new_start, new_end);
    }

    /// Auto duration for one line using the configured reading speed
    pub fn auto_duration<L: TimedLine>(&self, line: &mut L) {
        transforms::set_auto_duration(line, self.auto_duration_options());
    }

    /// Auto duration for every line
    pub fn auto_duration_all<L: TimedLine>(&self, lines: &mut [L]) {
        let options = self.auto_duration_options();
        for line in lines.iter_mut() {
            transforms::set_auto_duration(line, options);
        }
    }

    /// Snap a single timestamp at the configured frame rate
    pub fn snap(&self, time: Timestamp) -> Timestamp {
        transforms::snap_to_frame(time, self.config.fps)
    }

    pub fn snap_lines<L: TimedLine>(&self, lines: &mut [L]) {
        transforms::snap_lines_to_frame(lines, self.config.fps);
    }

    pub fn fill_gaps<L: TimedLine>(&self, lines: &mut [L]) {
        transforms::fill_gaps(lines, self.config.max_gap_ms);
    }

    pub fn fix_overlaps<L: TimedLine>(&self, lines: &mut [L]) {
        transforms::fix_overlaps(lines, self.config.min_gap_ms);
    }

    fn auto_duration_options(&self) -> AutoDurationOptions {
        AutoDurationOptions {
            target_cps: self.config.target_cps,
            min_duration: Timestamp::from_millis(self.config.min_duration_ms),
            max_duration: Timestamp::from_millis(self.config.max_duration_ms),
        }
    }
}
