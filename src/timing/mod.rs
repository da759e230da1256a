/*!
 * Subtitle timing: the timestamp type, the line abstraction and the
 * transforms that retime sequences of lines.
 *
 * # Architecture
 *
 * - `timestamp`: Signed 100ns timestamp with SRT formatting
 * - `line`: The `TimedLine` trait consumed by the transforms
 * - `transforms`: Shift, scale, stretch, auto duration, frame snapping,
 *   gap filling and overlap fixing
 * - `service`: The transforms bound to a `TimingConfig`
 */

pub mod line;
pub mod service;
pub mod timestamp;
pub mod transforms;

// Re-export main types
pub use line::TimedLine;
pub use service::TimingService;
pub use timestamp::Timestamp;
pub use transforms::{
    AutoDurationOptions, ShiftOptions, fill_gaps, fix_overlaps, scale_timing, set_auto_duration,
    shift_timing, snap_lines_to_frame, snap_to_frame, stretch_timing,
};
