/*!
 * The line abstraction consumed by the timing transforms.
 */

use std::borrow::Cow;

use super::Timestamp;

/// A subtitle line with mutable timing and readable text.
///
/// The transforms never create or drop lines; they only rewrite `start`
/// and `end` through this trait, so any record type the caller owns can be
/// retimed in place.
pub trait TimedLine {
    /// Start of the line
    fn start(&self) -> Timestamp;

    /// End of the line
    fn end(&self) -> Timestamp;

    /// Replace the start of the line
    fn set_start(&mut self, start: Timestamp);

    /// Replace the end of the line
    fn set_end(&mut self, end: Timestamp);

    /// Text as a reader sees it, without markup
    fn plain_text(&self) -> Cow<'_, str>;

    /// Display length of the text in characters
    fn char_count(&self) -> usize {
        self.plain_text().chars().count()
    }

    /// Time between start and end (negative if the range is inverted)
    fn duration(&self) -> Timestamp {
        self.end() - self.start()
    }
}
