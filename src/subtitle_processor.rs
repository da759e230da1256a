use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::timing::{TimedLine, Timestamp};

// @module: Subtitle records and SRT reading/writing

// @const: SRT timing line
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+:\d{2}:\d{2}[,.]\d{1,3})\s*-->\s*(-?\d+:\d{2}:\d{2}[,.]\d{1,3})").unwrap()
});

// @const: HTML-style tags and ASS override blocks
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[A-Za-z][^>]*>|\{\\[^}]*\}").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time
    pub start: Timestamp,

    // @field: End time
    pub end: Timestamp,

    // @field: Subtitle text, markup included
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry without checking its timing
    pub fn new(seq_num: usize, start: Timestamp, end: Timestamp, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start,
            end,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: Time range and non-empty text
    pub fn new_validated(
        seq_num: usize,
        start: Timestamp,
        end: Timestamp,
        text: String,
    ) -> Result<Self, SubtitleError> {
        if end <= start {
            return Err(SubtitleError::InvalidTimeRange { seq_num, start, end });
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(SubtitleError::EmptyText(seq_num));
        }

        Ok(SubtitleEntry {
            seq_num,
            start,
            end,
            text: trimmed_text.to_string(),
        })
    }

    /// Text with markup removed and escaped line breaks expanded
    pub fn strip_markup(text: &str) -> Cow<'_, str> {
        if !text.contains(&['<', '{', '\\'][..]) {
            return Cow::Borrowed(text);
        }

        let stripped = MARKUP_REGEX.replace_all(text, "");
        Cow::Owned(stripped.replace("\\N", "\n").replace("\\n", "\n"))
    }
}

impl TimedLine for SubtitleEntry {
    fn start(&self) -> Timestamp {
        self.start
    }

    fn end(&self) -> Timestamp {
        self.end
    }

    fn set_start(&mut self, start: Timestamp) {
        self.start = start;
    }

    fn set_end(&mut self, end: Timestamp) {
        self.end = end;
    }

    fn plain_text(&self) -> Cow<'_, str> {
        Self::strip_markup(&self.text)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries read from one file
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Read and parse an SRT file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;

        let entries = Self::parse_srt_string(&content)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;

        debug!("Loaded {} entries from {}", entries.len(), path.display());

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Write the collection to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_srt_string())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        debug!("Wrote {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Render the collection as SRT text
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Renumber entries 1..=n in their current order
    pub fn renumber(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }
    }

    /// Parse SRT content, skipping malformed blocks.
    ///
    /// Entries keep their file order and are renumbered 1..=n. Zero-length
    /// and inverted ranges are kept with a warning so the validator can
    /// report them; only blocks without text are dropped.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let content = content.trim_start_matches('\u{feff}');
        let mut entries: Vec<SubtitleEntry> = Vec::new();

        // State variables for parsing
        let mut current_seq_num: Option<usize> = None;
        let mut current_times: Option<(Timestamp, Timestamp)> = None;
        let mut current_text = String::new();

        let mut add_current_entry = |seq_num: usize, (start, end): (Timestamp, Timestamp), text: &str| {
            let text = text.trim();
            if text.is_empty() {
                warn!("Skipping subtitle entry {}: {}", seq_num, SubtitleError::EmptyText(seq_num));
                return;
            }
            if end <= start {
                warn!(
                    "Keeping subtitle entry {}: {}",
                    seq_num,
                    SubtitleError::InvalidTimeRange { seq_num, start, end }
                );
            }
            entries.push(SubtitleEntry::new(seq_num, start, end, text.to_string()));
        };

        for (line_idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            // A blank line closes the current block
            if trimmed.is_empty() {
                if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
                    if !current_text.is_empty() {
                        add_current_entry(seq_num, times, &current_text);
                        current_seq_num = None;
                        current_times = None;
                        current_text.clear();
                    }
                }
                continue;
            }

            if current_seq_num.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            if current_seq_num.is_some() && current_times.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    match (caps[1].parse::<Timestamp>(), caps[2].parse::<Timestamp>()) {
                        (Ok(start), Ok(end)) => {
                            current_times = Some((start, end));
                            continue;
                        }
                        _ => warn!("Invalid timestamp at line {}: {}", line_idx + 1, trimmed),
                    }
                }
            }

            if current_seq_num.is_some() && current_times.is_some() {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!(
                    "Unexpected text at line {} before sequence number or timestamp: {}",
                    line_idx + 1,
                    trimmed
                );
            }
        }

        if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
            if !current_text.is_empty() {
                add_current_entry(seq_num, times, &current_text);
            }
        }

        if entries.is_empty() {
            warn!("No valid subtitle entries found in content");
            return Err(SubtitleError::NoEntries);
        }

        if entries.windows(2).any(|pair| pair[1].start < pair[0].start) {
            warn!("Subtitle entries are not in start order; keeping file order");
        }

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        Ok(entries)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_srt_string())
    }
}
