/*!
 * Integration tests for the retiming workflow
 */

use anyhow::Result;

use subtime::app_config::Config;
use subtime::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use subtime::timing::transforms::{ShiftOptions, fix_overlaps, shift_timing};
use subtime::timing::{Timestamp, TimingService};
use subtime::validation::{TimecodeIssue, TimecodeValidator};
use crate::common::{self, entry, ms};

/// Load, retime, validate and save a file, then read it back
#[test]
fn test_subtitle_workflow_withFullProcess_shouldSucceed() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "input.srt")?;

    let mut collection = SubtitleCollection::from_file(&input)?;
    let service = TimingService::new();
    let validator = TimecodeValidator::new();

    // The sample has one overlap (entry 2 ends after entry 3 starts)
    let before = validator.validate_collection(&collection.entries);
    assert_eq!(before.overlap_count, 1);

    service.shift(&mut collection.entries, ms(2000));
    service.fill_gaps(&mut collection.entries);
    service.fix_overlaps(&mut collection.entries);

    let after = validator.validate_collection(&collection.entries);
    assert_eq!(after.overlap_count, 0);
    assert!(after.passed);

    let output = temp_dir.path().join("output.srt");
    collection.write_to_srt(&output)?;

    let reloaded = SubtitleCollection::from_file(&output)?;
    let times: Vec<(Timestamp, Timestamp)> = reloaded.entries.iter().map(|e| (e.start, e.end)).collect();
    assert_eq!(
        times,
        vec![
            (ms(3000), ms(6050)),
            (ms(6100), ms(10_850)),
            (ms(10_900), ms(16_000)),
        ]
    );
    Ok(())
}

/// Frame-rate conversion keeps the file valid and the text intact
#[test]
fn test_subtitle_workflow_withFilmToPalConversion_shouldPreserveText() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "film.srt")?;

    let mut collection = SubtitleCollection::from_file(&input)?;
    let texts: Vec<String> = collection.entries.iter().map(|e| e.text.clone()).collect();

    let service = TimingService::new();
    service.scale(&mut collection.entries, 23.976 / 25.0, Timestamp::ZERO);

    let output = temp_dir.path().join("pal.srt");
    collection.write_to_srt(&output)?;
    let reloaded = SubtitleCollection::from_file(&output)?;

    assert_eq!(reloaded.entries.iter().map(|e| e.text.clone()).collect::<Vec<_>>(), texts);
    // 1000ms * 0.95904 = 959.04ms, written as 959
    assert_eq!(reloaded.entries[0].start, ms(959));
    Ok(())
}

/// Large minimum gaps can invert a line; the validator reports it
#[test]
fn test_subtitle_workflow_withOversizedMinGap_shouldBeCaughtByValidator() -> Result<()> {
    common::init_logging();
    let content = "1\n00:00:01,000 --> 00:00:02,000\nOne\n\n2\n00:00:01,200 --> 00:00:03,000\nTwo\n";
    let mut entries = SubtitleCollection::parse_srt_string(content)?;

    let mut config = Config::default();
    config.timing.min_gap_ms = 500;
    let service = TimingService::with_config(config.timing.clone());
    service.fix_overlaps(&mut entries);

    assert_eq!(entries[0].end, ms(700));

    let report = TimecodeValidator::with_config(config.validation).validate_collection(&entries);
    assert!(!report.passed);
    assert!(matches!(
        report.lines[0].issues[0],
        TimecodeIssue::InvalidTimeRange { .. }
    ));
    Ok(())
}

/// Stretching a whole file onto a new span lands exactly on the new bounds
#[test]
fn test_subtitle_workflow_withStretch_shouldHitNewBounds() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "stretch.srt")?;
    let mut collection = SubtitleCollection::from_file(&input)?;

    TimingService::new().stretch(&mut collection.entries, ms(0), ms(26_000));

    let first = collection.entries.first().map(|e| e.start);
    let last = collection.entries.last().map(|e| e.end);
    assert_eq!(first, Some(ms(0)));
    assert_eq!(last, Some(ms(26_000)));
    // Factor 2: the second line started 3.1s after the first
    assert_eq!(collection.entries[1].start, ms(6200));
    Ok(())
}

/// Writes entries to a temporary SRT file and reads them back
fn write_and_reload(entries: Vec<SubtitleEntry>, filename: &str) -> Result<SubtitleCollection> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join(filename);
    let mut collection = SubtitleCollection::new(path.clone());
    collection.entries = entries;
    collection.write_to_srt(&path)?;
    SubtitleCollection::from_file(&path)
}

/// A line shifted past zero collapses to 0 -> 0 and survives the next load
#[test]
fn test_subtitle_workflow_withShiftPastZero_shouldReloadEveryLine() -> Result<()> {
    common::init_logging();
    let mut entries = vec![entry(1, 1000, 4000, "Gone early"), entry(2, 6000, 9000, "Still here")];

    shift_timing(&mut entries, ms(-5000), ShiftOptions::default());
    assert_eq!((entries[0].start, entries[0].end), (ms(0), ms(0)));

    let reloaded = write_and_reload(entries, "shifted.srt")?;

    assert_eq!(reloaded.entries.len(), 2);
    assert_eq!((reloaded.entries[0].start, reloaded.entries[0].end), (ms(0), ms(0)));
    assert_eq!(reloaded.entries[0].text, "Gone early");
    assert_eq!((reloaded.entries[1].start, reloaded.entries[1].end), (ms(1000), ms(4000)));

    let report = TimecodeValidator::new().validate_collection(&reloaded.entries);
    assert!(matches!(
        report.lines[0].issues[0],
        TimecodeIssue::InvalidTimeRange { .. }
    ));
    Ok(())
}

/// An inverted line left by fix_overlaps is written and read back unchanged
#[test]
fn test_subtitle_workflow_withInvertedLineFromFixOverlaps_shouldReloadEveryLine() -> Result<()> {
    common::init_logging();
    let mut entries = vec![entry(1, 1000, 2000, "First"), entry(2, 1020, 3000, "Second")];

    fix_overlaps(&mut entries, 50);
    assert_eq!(entries[0].end, ms(970));

    let reloaded = write_and_reload(entries, "fixed.srt")?;

    assert_eq!(reloaded.entries.len(), 2);
    assert_eq!((reloaded.entries[0].start, reloaded.entries[0].end), (ms(1000), ms(970)));
    assert_eq!((reloaded.entries[1].start, reloaded.entries[1].end), (ms(1020), ms(3000)));
    Ok(())
}

/// Mirrored stretch output keeps its written order on reload
#[test]
fn test_subtitle_workflow_withMirroredStretch_shouldKeepWrittenOrder() -> Result<()> {
    common::init_logging();
    let mut entries = vec![entry(1, 1000, 2000, "First"), entry(2, 3000, 4000, "Second")];

    // Factor -1 around the first start
    TimingService::new().stretch(&mut entries, ms(3000), ms(0));

    let reloaded = write_and_reload(entries, "mirrored.srt")?;

    let texts: Vec<&str> = reloaded.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["First", "Second"]);
    assert_eq!((reloaded.entries[0].start, reloaded.entries[0].end), (ms(3000), ms(2000)));
    assert_eq!((reloaded.entries[1].start, reloaded.entries[1].end), (ms(1000), ms(0)));
    Ok(())
}
