/*!
 * Tests for subtitle processing functionality
 */

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use subtime::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use subtime::timing::TimedLine;
use crate::common::{self, entry, ms};

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = entry(1, 5000, 10000, "Test subtitle");
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert_eq!(output, "1\n00:00:05,000 --> 00:00:10,000\nTest subtitle\n\n");
}

/// Test subtitle entry as a timed line
#[test]
fn test_subtitle_entry_timedLine_withMarkup_shouldExposePlainText() {
    let mut entry = SubtitleEntry::new(
        42,
        ms(61234),
        ms(65432),
        "<b>Hello</b>\nWorld".to_string(),
    );

    assert_eq!(entry.start(), ms(61234));
    assert_eq!(entry.duration(), ms(4198));
    assert_eq!(entry.plain_text(), "Hello\nWorld");
    assert_eq!(entry.char_count(), 11);

    entry.set_end(ms(70000));
    assert_eq!(entry.end, ms(70000));
    assert_eq!(entry.text, "<b>Hello</b>\nWorld");
}

/// Test in-memory subtitle collection
#[test]
fn test_in_memory_subtitle_collection_withValidEntries_shouldStoreCorrectly() {
    let source_file = PathBuf::from("test.srt");
    let mut collection = SubtitleCollection::new(source_file.clone());

    collection.entries.push(entry(1, 0, 5000, "First subtitle"));
    collection.entries.push(entry(2, 5500, 10000, "Second subtitle"));

    assert_eq!(collection.source_file, source_file);
    assert_eq!(collection.entries.len(), 2);
    assert_eq!(collection.entries[0].text, "First subtitle");
    assert_eq!(collection.entries[1].start, ms(5500));
}

/// Test loading a sample file from disk
#[test]
fn test_from_file_withSampleSubtitle_shouldParseAllEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;

    let collection = SubtitleCollection::from_file(&path)?;

    assert_eq!(collection.source_file, path);
    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[2].text, "<i>For testing purposes.</i>");
    assert_eq!(collection.entries[2].plain_text(), "For testing purposes.");
    Ok(())
}

/// Test a missing file reports an error instead of panicking
#[test]
fn test_from_file_withMissingFile_shouldFail() {
    let result = SubtitleCollection::from_file("/nonexistent/dir/missing.srt");

    assert!(result.is_err());
}

/// Test CRLF line endings and dotted milliseconds
#[test]
fn test_parse_srt_string_withCrlfAndDots_shouldParse() {
    let content = "1\r\n00:00:01.000 --> 00:00:02.000\r\nHello\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nWorld\r\n";

    let entries = SubtitleCollection::parse_srt_string(content).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].start, ms(1000));
    assert_eq!(entries[1].text, "World");
}
