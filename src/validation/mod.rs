/*!
 * Validation of retimed subtitles.
 *
 * The timing transforms never reject their own output. Callers that need
 * `end > start`, non-negative times or non-overlapping lines run the
 * validator here after transforming.
 *
 * - `timecodes`: Validates timing data integrity
 */

pub mod timecodes;

// Re-export main types
pub use timecodes::{
    LineReport, TimecodeIssue, TimecodeValidationResult, TimecodeValidator,
    TimecodeValidatorConfig,
};
