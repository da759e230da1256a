/*!
 * Timing transforms over sequences of subtitle lines.
 *
 * Every function here is stateless and works on a caller-owned `&mut [L]`
 * (or a single `&mut L`), rewriting only the `start`/`end` of each line.
 * None of them fail: degenerate inputs are skipped silently.
 *
 * Ordering is the caller's job. `fill_gaps`, `fix_overlaps` and
 * `stretch_timing` assume lines sorted ascending by start.
 */

use log::{debug, warn};

use super::{TimedLine, Timestamp};

/// Default reading speed for auto duration, in characters per second
pub const DEFAULT_TARGET_CPS: f64 = 15.0;

/// Default shortest duration produced by auto duration
pub const DEFAULT_MIN_DURATION: Timestamp = Timestamp::from_millis(1_000);

/// Default longest duration produced by auto duration
pub const DEFAULT_MAX_DURATION: Timestamp = Timestamp::from_millis(7_000);

/// Default frame rate for snapping (NTSC film)
pub const DEFAULT_FPS: f64 = 23.976;

/// Default largest gap closed by `fill_gaps`
pub const DEFAULT_MAX_GAP_MS: i64 = 200;

/// Default silence enforced by `fix_overlaps`
pub const DEFAULT_MIN_GAP_MS: i64 = 50;

/// Which endpoints `shift_timing` moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftOptions {
    /// Move line starts
    pub shift_start: bool,
    /// Move line ends
    pub shift_end: bool,
}

impl ShiftOptions {
    /// Move only the starts
    pub fn start_only() -> Self {
        Self { shift_start: true, shift_end: false }
    }

    /// Move only the ends
    pub fn end_only() -> Self {
        Self { shift_start: false, shift_end: true }
    }
}

impl Default for ShiftOptions {
    fn default() -> Self {
        Self { shift_start: true, shift_end: true }
    }
}

/// Parameters for `set_auto_duration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoDurationOptions {
    /// Reading speed in characters per second
    pub target_cps: f64,
    /// Lower clamp for the computed duration
    pub min_duration: Timestamp,
    /// Upper clamp for the computed duration
    pub max_duration: Timestamp,
}

impl Default for AutoDurationOptions {
    fn default() -> Self {
        Self {
            target_cps: DEFAULT_TARGET_CPS,
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

/// Move the selected endpoints of every line by `offset`, flooring at zero.
pub fn shift_timing<L: TimedLine>(lines: &mut [L], offset: Timestamp, options: ShiftOptions) {
    for line in lines.iter_mut() {
        if options.shift_start {
            line.set_start((line.start() + offset).max(Timestamp::ZERO));
        }
        if options.shift_end {
            line.set_end((line.end() + offset).max(Timestamp::ZERO));
        }
    }

    debug!("Shifted {} lines by {}", lines.len(), offset);
}

/// Scale every line's timing around `reference_time`.
///
/// A factor above 1.0 slows playback down (durations and gaps grow), below
/// 1.0 speeds it up. Results are not clamped: a line before the pivot moves
/// further before it and may end up negative.
pub fn scale_timing<L: TimedLine>(lines: &mut [L], scale_factor: f64, reference_time: Timestamp) {
    for line in lines.iter_mut() {
        let start = reference_time + (line.start() - reference_time).scale(scale_factor);
        let end = reference_time + (line.end() - reference_time).scale(scale_factor);
        line.set_start(start);
        line.set_end(end);
    }

    debug!(
        "Scaled {} lines by {} around {}",
        lines.len(),
        scale_factor,
        reference_time
    );
}

/// Map the span from the first start to the last end onto `[new_start, new_end]`.
///
/// Empty input and a zero-length source span are left untouched. A reversed
/// target (or source) span yields a negative factor, which mirrors the lines.
pub fn stretch_timing<L: TimedLine>(lines: &mut [L], new_start: Timestamp, new_end: Timestamp) {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return;
    };

    let old_start = first.start();
    let old_end = last.end();
    let old_duration = old_end - old_start;
    if old_duration == Timestamp::ZERO {
        debug!("Skipping stretch: source span has zero length");
        return;
    }

    let scale = (new_end - new_start).ticks() as f64 / old_duration.ticks() as f64;
    if scale < 0.0 {
        warn!("Stretching with a negative factor ({:.4}); line order will be mirrored", scale);
    }

    for line in lines.iter_mut() {
        let start = new_start + (line.start() - old_start).scale(scale);
        let end = new_start + (line.end() - old_start).scale(scale);
        line.set_start(start);
        line.set_end(end);
    }

    debug!(
        "Stretched {} lines from [{}, {}] to [{}, {}]",
        lines.len(),
        old_start,
        old_end,
        new_start,
        new_end
    );
}

/// Set `end` from the text length at the target reading speed.
///
/// Neighbouring lines are not consulted, so this can reintroduce overlaps.
pub fn set_auto_duration<L: TimedLine>(line: &mut L, options: AutoDurationOptions) {
    let chars = line.char_count() as f64;
    let raw = Timestamp::from_secs_f64(chars / options.target_cps);
    // max-then-min instead of clamp(): an inverted range must not panic
    let duration = raw.max(options.min_duration).min(options.max_duration);

    line.set_end(line.start() + duration);
}

/// Round `time` to the nearest frame boundary at `fps`, ties to even.
pub fn snap_to_frame(time: Timestamp, fps: f64) -> Timestamp {
    let frame_duration = 1.0 / fps;
    let frames = (time.as_secs_f64() / frame_duration).round_ties_even();

    Timestamp::from_secs_f64(frames * frame_duration)
}

/// Snap both endpoints of every line to the frame grid.
pub fn snap_lines_to_frame<L: TimedLine>(lines: &mut [L], fps: f64) {
    for line in lines.iter_mut() {
        line.set_start(snap_to_frame(line.start(), fps));
        line.set_end(snap_to_frame(line.end(), fps));
    }

    debug!("Snapped {} lines to a {} fps grid", lines.len(), fps);
}

/// Extend each line to its successor's start when the gap is at most `max_gap_ms`.
///
/// Only strictly positive gaps are closed; touching and overlapping pairs
/// are left as they are.
pub fn fill_gaps<L: TimedLine>(lines: &mut [L], max_gap_ms: i64) {
    let max_gap = Timestamp::from_millis(max_gap_ms);
    let mut filled = 0;

    for i in 0..lines.len().saturating_sub(1) {
        let next_start = lines[i + 1].start();
        let current = &mut lines[i];
        let gap = next_start - current.end();

        if gap > Timestamp::ZERO && gap <= max_gap {
            current.set_end(next_start);
            filled += 1;
        }
    }

    debug!("Filled {} gaps (max {}ms)", filled, max_gap_ms);
}

/// Pull each line's end back so at least `min_gap_ms` separates it from its successor.
///
/// Only shortens. When successive starts are closer than `min_gap_ms` the
/// end lands before the start; that result is kept and logged.
pub fn fix_overlaps<L: TimedLine>(lines: &mut [L], min_gap_ms: i64) {
    let min_gap = Timestamp::from_millis(min_gap_ms);
    let mut fixed = 0;

    for i in 0..lines.len().saturating_sub(1) {
        let min_end = lines[i + 1].start() - min_gap;
        let current = &mut lines[i];

        if current.end() > min_end {
            current.set_end(min_end);
            fixed += 1;

            if min_end < current.start() {
                warn!(
                    "Line {} now ends before it starts ({} < {})",
                    i + 1,
                    min_end,
                    current.start()
                );
            }
        }
    }

    debug!("Fixed {} overlaps (min gap {}ms)", fixed, min_gap_ms);
}
