/*!
 * Timestamp value type used by every timing operation.
 *
 * A timestamp is a signed count of 100-nanosecond ticks. Ticks keep scaled
 * and stretched timings free of millisecond rounding drift, and the sign
 * lets pivot scaling go below zero without wrapping.
 */

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TimestampError;

/// Ticks in one millisecond
pub const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Ticks in one second
pub const TICKS_PER_SECOND: i64 = 10_000_000;

const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;

// @const: Clock form, e.g. 01:02:03,456 or 1:02:03.4567
static CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})(?:[,.](\d{1,7}))?$").unwrap()
});

/// A point on (or offset along) a subtitle timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    ticks: i64,
}

impl Timestamp {
    /// Time zero
    pub const ZERO: Timestamp = Timestamp { ticks: 0 };

    /// Create a timestamp from raw 100ns ticks
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Create a timestamp from whole milliseconds
    pub const fn from_millis(ms: i64) -> Self {
        Self { ticks: ms * TICKS_PER_MILLISECOND }
    }

    /// Create a timestamp from fractional seconds, rounded to the nearest tick
    pub fn from_secs_f64(secs: f64) -> Self {
        Self { ticks: (secs * TICKS_PER_SECOND as f64).round() as i64 }
    }

    /// Raw 100ns ticks
    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    /// Whole milliseconds, truncated toward zero
    pub const fn as_millis(self) -> i64 {
        self.ticks / TICKS_PER_MILLISECOND
    }

    /// Fractional seconds
    pub fn as_secs_f64(self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// Multiply by a real factor, rounded to the nearest tick
    pub fn scale(self, factor: f64) -> Self {
        Self { ticks: (self.ticks as f64 * factor).round() as i64 }
    }

    /// Whether this timestamp lies before time zero
    pub const fn is_negative(self) -> bool {
        self.ticks < 0
    }

    /// Length of one video frame at the given rate
    pub fn frame_duration(fps: f64) -> Self {
        Self::from_secs_f64(1.0 / fps)
    }

    /// Format as an SRT timestamp (HH:MM:SS,mmm), rounded to the nearest millisecond
    pub fn to_srt_string(self) -> String {
        let sign = if self.ticks < 0 { "-" } else { "" };
        let abs_ticks = self.ticks.unsigned_abs();
        let ms = (abs_ticks + (TICKS_PER_MILLISECOND as u64 / 2)) / TICKS_PER_MILLISECOND as u64;

        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{}{:02}:{:02}:{:02},{:03}", sign, hours, minutes, seconds, millis)
    }

    /// Parse the unsigned clock form (HH:MM:SS,mmm with 1 to 7 fraction digits)
    fn parse_clock(text: &str) -> Result<i64, TimestampError> {
        let caps = CLOCK_REGEX
            .captures(text)
            .ok_or_else(|| TimestampError::InvalidFormat(text.to_string()))?;

        let component = |idx: usize| -> Result<i64, TimestampError> {
            caps[idx]
                .parse::<i64>()
                .map_err(|_| TimestampError::InvalidComponent(text.to_string()))
        };

        let hours = component(1)?;
        let minutes = component(2)?;
        let seconds = component(3)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(TimestampError::InvalidComponent(text.to_string()));
        }

        // Fraction digits are a decimal fraction of a second, padded out to ticks
        let fraction_ticks = match caps.get(4) {
            Some(m) => {
                let digits = m.as_str();
                let value: i64 = digits
                    .parse()
                    .map_err(|_| TimestampError::InvalidComponent(text.to_string()))?;
                value * 10_i64.pow(7 - digits.len() as u32)
            }
            None => 0,
        };

        hours
            .checked_mul(TICKS_PER_HOUR)
            .and_then(|t| t.checked_add(minutes * TICKS_PER_MINUTE + seconds * TICKS_PER_SECOND + fraction_ticks))
            .ok_or_else(|| TimestampError::InvalidComponent(text.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_srt_string())
    }
}

/// Accepts `[-]HH:MM:SS,mmm`, `[-]HH:MM:SS.mmm`, `[-]<n>ms` and `[-]<seconds>[s]`
impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        if body.is_empty() {
            return Err(TimestampError::InvalidFormat(s.to_string()));
        }

        let ticks = if body.contains(':') {
            Self::parse_clock(body)?
        } else {
            let (number, unit_ticks) = match body.strip_suffix("ms") {
                Some(ms) => (ms, TICKS_PER_MILLISECOND),
                None => (body.strip_suffix('s').unwrap_or(body), TICKS_PER_SECOND),
            };
            let value: f64 = number
                .trim()
                .parse()
                .map_err(|_| TimestampError::InvalidFormat(s.to_string()))?;
            if !value.is_finite() || value < 0.0 {
                return Err(TimestampError::InvalidFormat(s.to_string()));
            }
            (value * unit_ticks as f64).round() as i64
        };

        Ok(Self { ticks: if negative { -ticks } else { ticks } })
    }
}

impl Add for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Timestamp) -> Timestamp {
        Timestamp { ticks: self.ticks + rhs.ticks }
    }
}

impl AddAssign for Timestamp {
    fn add_assign(&mut self, rhs: Timestamp) {
        self.ticks += rhs.ticks;
    }
}

impl Sub for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Timestamp) -> Timestamp {
        Timestamp { ticks: self.ticks - rhs.ticks }
    }
}

impl SubAssign for Timestamp {
    fn sub_assign(&mut self, rhs: Timestamp) {
        self.ticks -= rhs.ticks;
    }
}

impl Neg for Timestamp {
    type Output = Timestamp;

    fn neg(self) -> Timestamp {
        Timestamp { ticks: -self.ticks }
    }
}
