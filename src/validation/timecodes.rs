/*!
 * Timecode checks for retimed subtitle lines.
 *
 * Transforms leave degenerate results in place (a line shifted onto zero,
 * an end pulled behind its start, times pushed below zero by a pivot). The
 * validator walks the lines in the order given and reports them, along with
 * durations, reading speed and how each line sits against its predecessor.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::timing::{TimedLine, Timestamp};

// @const: Reading speed above which a line is flagged
const DEFAULT_MAX_READING_CPS: f64 = 25.0;

// @const: Shortest acceptable line in milliseconds
const DEFAULT_MIN_LINE_MS: i64 = 500;

// @const: Longest acceptable line in milliseconds
const DEFAULT_MAX_LINE_MS: i64 = 30_000;

/// Something wrong with one line's timing
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// Start or end lies before time zero
    NegativeTimestamp { start: Timestamp, end: Timestamp },
    /// End does not come after start
    InvalidTimeRange { start: Timestamp, end: Timestamp },
    /// Shown for less than the configured minimum
    DurationTooShort { duration_ms: i64, min_duration_ms: i64 },
    /// Shown for longer than the configured maximum
    DurationTooLong { duration_ms: i64, max_duration_ms: i64 },
    /// More characters per second than the configured limit
    ReadingSpeedTooHigh { cps: f64, max_cps: f64 },
    /// Still on screen when this line starts
    OverlapsWithPrevious { previous_index: usize, overlap_ms: i64 },
    /// Long silence before this line; informational only
    LargeGap { previous_index: usize, gap_ms: i64 },
}

impl TimecodeIssue {
    /// Whether the issue fails the line, as opposed to a plain notice
    pub fn is_failure(&self) -> bool {
        !matches!(self, TimecodeIssue::LargeGap { .. })
    }
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeTimestamp { start, end } => {
                write!(f, "runs before zero ({} --> {})", start, end)
            }
            Self::InvalidTimeRange { start, end } => {
                write!(f, "ends at {} which is not after its start {}", end, start)
            }
            Self::DurationTooShort { duration_ms, min_duration_ms } => {
                write!(f, "on screen {}ms, below the {}ms minimum", duration_ms, min_duration_ms)
            }
            Self::DurationTooLong { duration_ms, max_duration_ms } => {
                write!(f, "on screen {}ms, above the {}ms maximum", duration_ms, max_duration_ms)
            }
            Self::ReadingSpeedTooHigh { cps, max_cps } => {
                write!(f, "reads at {:.1} chars/s, limit {:.1}", cps, max_cps)
            }
            Self::OverlapsWithPrevious { previous_index, overlap_ms } => {
                write!(f, "starts {}ms before line {} ends", overlap_ms, previous_index + 1)
            }
            Self::LargeGap { previous_index, gap_ms } => {
                write!(f, "{}ms of silence after line {}", gap_ms, previous_index + 1)
            }
        }
    }
}

/// Findings for one line
#[derive(Debug, Clone, Default)]
pub struct LineReport {
    /// Position in the checked slice (0-based)
    pub index: usize,
    /// Everything found, failures and notices alike
    pub issues: Vec<TimecodeIssue>,
}

impl LineReport {
    /// True unless one of the issues is a failure
    pub fn passed(&self) -> bool {
        !self.issues.iter().any(TimecodeIssue::is_failure)
    }
}

/// Findings for a whole sequence
#[derive(Debug, Clone, Default)]
pub struct TimecodeValidationResult {
    /// True when no line failed
    pub passed: bool,
    /// One report per line, in input order
    pub lines: Vec<LineReport>,
    /// Issue count across all lines, notices included
    pub total_issues: usize,
    /// Adjacent pairs where the earlier line runs into the later one
    pub overlap_count: usize,
}

impl TimecodeValidationResult {
    /// Reports for the lines that failed
    pub fn failed_lines(&self) -> Vec<&LineReport> {
        self.lines.iter().filter(|line| !line.passed()).collect()
    }
}

/// Limits applied by `TimecodeValidator`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimecodeValidatorConfig {
    // @field: Reading speed limit in characters per second
    #[serde(default = "default_max_cps")]
    pub max_cps: f64,

    // @field: Shortest acceptable line, ms
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: i64,

    // @field: Longest acceptable line, ms
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: i64,

    // @field: Report lines that start before their predecessor ends
    #[serde(default = "default_check_overlaps")]
    pub check_overlaps: bool,

    // @field: Note gaps longer than this, ms (unset: never)
    #[serde(default)]
    pub max_gap_warning_ms: Option<i64>,
}

fn default_max_cps() -> f64 {
    DEFAULT_MAX_READING_CPS
}

fn default_min_duration_ms() -> i64 {
    DEFAULT_MIN_LINE_MS
}

fn default_max_duration_ms() -> i64 {
    DEFAULT_MAX_LINE_MS
}

fn default_check_overlaps() -> bool {
    true
}

impl Default for TimecodeValidatorConfig {
    fn default() -> Self {
        Self {
            max_cps: default_max_cps(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            check_overlaps: default_check_overlaps(),
            max_gap_warning_ms: None,
        }
    }
}

/// Checks timed lines against a `TimecodeValidatorConfig`
#[derive(Debug, Clone, Default)]
pub struct TimecodeValidator {
    config: TimecodeValidatorConfig,
}

impl TimecodeValidator {
    /// Validator with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with custom limits
    pub fn with_config(config: TimecodeValidatorConfig) -> Self {
        Self { config }
    }

    /// Check one line on its own
    pub fn validate_entry<L: TimedLine>(&self, index: usize, line: &L) -> LineReport {
        let (start, end) = (line.start(), line.end());
        let mut issues = Vec::new();

        if start.is_negative() || end.is_negative() {
            issues.push(TimecodeIssue::NegativeTimestamp { start, end });
        }

        // Duration and speed are meaningless without a positive length
        if end <= start {
            issues.push(TimecodeIssue::InvalidTimeRange { start, end });
        } else {
            issues.extend(self.duration_issue(line.duration()));
            issues.extend(self.speed_issue(line));
        }

        LineReport { index, issues }
    }

    /// Check every line, then each line against the one before it
    pub fn validate_collection<L: TimedLine>(&self, lines: &[L]) -> TimecodeValidationResult {
        let mut reports: Vec<LineReport> = lines
            .iter()
            .enumerate()
            .map(|(index, line)| self.validate_entry(index, line))
            .collect();

        let mut overlap_count = 0;
        for (previous_index, pair) in lines.windows(2).enumerate() {
            let (previous_end, next_start) = (pair[0].end(), pair[1].start());
            let report = &mut reports[previous_index + 1];

            if self.config.check_overlaps && previous_end > next_start {
                overlap_count += 1;
                report.issues.push(TimecodeIssue::OverlapsWithPrevious {
                    previous_index,
                    overlap_ms: (previous_end - next_start).as_millis(),
                });
            }

            if let Some(limit_ms) = self.config.max_gap_warning_ms {
                let gap_ms = (next_start - previous_end).as_millis();
                if gap_ms > limit_ms {
                    report.issues.push(TimecodeIssue::LargeGap { previous_index, gap_ms });
                }
            }
        }

        let total_issues = reports.iter().map(|r| r.issues.len()).sum();
        let passed = reports.iter().all(LineReport::passed);

        debug!(
            "Checked {} lines: {} issues, {} overlaps",
            lines.len(),
            total_issues,
            overlap_count
        );

        TimecodeValidationResult {
            passed,
            lines: reports,
            total_issues,
            overlap_count,
        }
    }

    /// Characters per second of the markup-free text; infinite for empty ranges
    pub fn calculate_cps<L: TimedLine>(line: &L) -> f64 {
        let seconds = line.duration().as_secs_f64();
        if seconds > 0.0 {
            line.char_count() as f64 / seconds
        } else {
            f64::INFINITY
        }
    }

    fn duration_issue(&self, duration: Timestamp) -> Option<TimecodeIssue> {
        let duration_ms = duration.as_millis();
        if duration_ms < self.config.min_duration_ms {
            Some(TimecodeIssue::DurationTooShort {
                duration_ms,
                min_duration_ms: self.config.min_duration_ms,
            })
        } else if duration_ms > self.config.max_duration_ms {
            Some(TimecodeIssue::DurationTooLong {
                duration_ms,
                max_duration_ms: self.config.max_duration_ms,
            })
        } else {
            None
        }
    }

    fn speed_issue<L: TimedLine>(&self, line: &L) -> Option<TimecodeIssue> {
        let cps = Self::calculate_cps(line);
        (cps > self.config.max_cps).then_some(TimecodeIssue::ReadingSpeedTooHigh {
            cps,
            max_cps: self.config.max_cps,
        })
    }
}
