/*!
 * Tests for error types and conversions
 */

use subtime::errors::{AppError, ConfigError, SubtitleError, TimestampError};
use subtime::timing::Timestamp;

#[test]
fn test_timestampError_invalidFormat_shouldDisplayCorrectly() {
    let error = TimestampError::InvalidFormat("12:xx".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Invalid timestamp format"));
    assert!(display.contains("12:xx"));
}

#[test]
fn test_subtitleError_invalidTimeRange_shouldDisplayTimestamps() {
    let error = SubtitleError::InvalidTimeRange {
        seq_num: 7,
        start: Timestamp::from_millis(2000),
        end: Timestamp::from_millis(1000),
    };
    let display = format!("{}", error);
    assert!(display.contains("entry 7"));
    assert!(display.contains("00:00:01,000"));
    assert!(display.contains("00:00:02,000"));
}

#[test]
fn test_subtitleError_fromTimestampError_shouldWrapCorrectly() {
    let error: SubtitleError = TimestampError::InvalidComponent("00:99:00".to_string()).into();
    assert!(matches!(error, SubtitleError::Timestamp(_)));
    assert!(format!("{}", error).contains("00:99:00"));
}

#[test]
fn test_configError_invalidValue_shouldNameField() {
    let error = ConfigError::InvalidValue {
        field: "timing.fps",
        reason: "must be a positive number, got 0".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("timing.fps"));
    assert!(display.contains("positive"));
}

#[test]
fn test_appError_fromConversions_shouldWrapCorrectly() {
    let from_subtitle: AppError = SubtitleError::NoEntries.into();
    assert!(matches!(from_subtitle, AppError::Subtitle(_)));

    let from_io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(ref msg) if msg.contains("gone")));

    let from_anyhow: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(from_anyhow, AppError::Unknown(ref msg) if msg == "something odd"));
}
