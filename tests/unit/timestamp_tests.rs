/*!
 * Tests for timestamp parsing, formatting and arithmetic
 */

use subtime::errors::TimestampError;
use subtime::timing::Timestamp;
use subtime::timing::timestamp::{TICKS_PER_MILLISECOND, TICKS_PER_SECOND};

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let parsed: Timestamp = ts.parse().unwrap();
    assert_eq!(parsed.as_millis(), 5_025_678);

    let formatted = parsed.to_srt_string();
    assert_eq!(formatted, ts);
}

/// Sub-millisecond precision survives parsing with extra fraction digits
#[test]
fn test_timestamp_parsing_withSevenFractionDigits_shouldKeepTicks() {
    let parsed: Timestamp = "00:00:01.0000001".parse().unwrap();

    assert_eq!(parsed.ticks(), TICKS_PER_SECOND + 1);
}

/// Hours are not limited to two digits
#[test]
fn test_timestamp_parsing_withLongHours_shouldParse() {
    let parsed: Timestamp = "123:00:00,000".parse().unwrap();

    assert_eq!(parsed.as_millis(), 123 * 3_600_000);
    assert_eq!(parsed.to_string(), "123:00:00,000");
}

/// Rejects seconds out of range
#[test]
fn test_timestamp_parsing_withSixtySeconds_shouldFail() {
    let result = "00:00:60,000".parse::<Timestamp>();

    assert_eq!(
        result,
        Err(TimestampError::InvalidComponent("00:00:60,000".to_string()))
    );
}

/// Frame duration matches 1 / fps
#[test]
fn test_frameDuration_withPal_shouldBeFortyMillis() {
    assert_eq!(Timestamp::frame_duration(25.0).ticks(), 40 * TICKS_PER_MILLISECOND);
}

/// Ordering follows the tick count, including negatives
#[test]
fn test_ordering_withNegativeValues_shouldSortNumerically() {
    let mut values = vec![
        Timestamp::from_millis(500),
        Timestamp::from_millis(-250),
        Timestamp::ZERO,
    ];
    values.sort();

    assert_eq!(
        values,
        vec![Timestamp::from_millis(-250), Timestamp::ZERO, Timestamp::from_millis(500)]
    );
}
