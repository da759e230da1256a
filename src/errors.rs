/*!
 * Error types for the subtime crate.
 *
 * The timing transforms themselves never fail. These types cover the edges
 * of the crate: parsing timestamps, reading SRT content and validating
 * configuration, using the thiserror crate for ergonomic definitions.
 */

use thiserror::Error;

use crate::timing::Timestamp;

/// Errors that can occur when parsing a timestamp from text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestampError {
    /// The text does not match any accepted timestamp form
    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    /// The text matched but one of its components is out of range
    #[error("Invalid time component in timestamp: {0}")]
    InvalidComponent(String),
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The content did not contain a single usable entry
    #[error("No valid subtitle entries were found in the SRT content")]
    NoEntries,

    /// An entry ends before (or when) it starts
    #[error("Invalid time range in entry {seq_num}: end {end} <= start {start}")]
    InvalidTimeRange {
        /// Sequence number of the entry
        seq_num: usize,
        /// Start time
        start: Timestamp,
        /// End time
        end: Timestamp,
    },

    /// An entry has no text after trimming
    #[error("Empty subtitle text for entry {0}")]
    EmptyText(usize),

    /// A timestamp could not be parsed
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),
}

/// Errors raised by configuration validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration field holds an unusable value
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from timestamp parsing
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
