/*!
 * Common test utilities for the subtime test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use subtime::subtitle_processor::SubtitleEntry;
use subtime::timing::Timestamp;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:04,100 --> 00:00:09,000
It contains multiple entries.

3
00:00:08,900 --> 00:00:14,000
<i>For testing purposes.</i>
"#;
    create_test_file(dir, filename, content)
}

/// Shorthand for a millisecond timestamp
pub fn ms(value: i64) -> Timestamp {
    Timestamp::from_millis(value)
}

/// Creates a subtitle entry from millisecond bounds
pub fn entry(seq_num: usize, start_ms: i64, end_ms: i64, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(seq_num, ms(start_ms), ms(end_ms), text.to_string())
}

/// Routes library log output through the test harness (RUST_LOG=debug to see it)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
