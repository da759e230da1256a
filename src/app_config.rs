/*!
 * Application configuration.
 *
 * Loading, validating and saving the JSON configuration file that holds the
 * timing defaults, the timecode check limits and the log level.
 */

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::timing::transforms::{
    DEFAULT_FPS, DEFAULT_MAX_DURATION, DEFAULT_MAX_GAP_MS, DEFAULT_MIN_DURATION,
    DEFAULT_MIN_GAP_MS, DEFAULT_TARGET_CPS,
};
use crate::validation::TimecodeValidatorConfig;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Defaults used by the timing transforms
    #[serde(default)]
    pub timing: TimingConfig,

    /// Post-transform timecode checks
    #[serde(default)]
    pub validation: TimecodeValidatorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Defaults for the timing transforms
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    // @field: Reading speed for auto duration
    #[serde(default = "default_target_cps")]
    pub target_cps: f64,

    // @field: Shortest auto duration (ms)
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: i64,

    // @field: Longest auto duration (ms)
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: i64,

    // @field: Frame rate for snapping
    #[serde(default = "default_fps")]
    pub fps: f64,

    // @field: Largest gap closed by fill-gaps (ms)
    #[serde(default = "default_max_gap_ms")]
    pub max_gap_ms: i64,

    // @field: Silence enforced by fix-overlaps (ms)
    #[serde(default = "default_min_gap_ms")]
    pub min_gap_ms: i64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_cps: default_target_cps(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            fps: default_fps(),
            max_gap_ms: default_max_gap_ms(),
            min_gap_ms: default_min_gap_ms(),
        }
    }
}

impl TimingConfig {
    /// Validate the timing defaults for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_cps.is_finite() && self.target_cps > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "timing.target_cps",
                reason: format!("must be a positive number, got {}", self.target_cps),
            });
        }

        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "timing.fps",
                reason: format!("must be a positive number, got {}", self.fps),
            });
        }

        check_millis("timing.min_duration_ms", self.min_duration_ms)?;
        check_millis("timing.max_duration_ms", self.max_duration_ms)?;

        if self.min_duration_ms > self.max_duration_ms {
            return Err(ConfigError::InvalidValue {
                field: "timing.max_duration_ms",
                reason: format!(
                    "must be at least min_duration_ms ({}), got {}",
                    self.min_duration_ms, self.max_duration_ms
                ),
            });
        }

        check_millis("timing.max_gap_ms", self.max_gap_ms)?;
        check_millis("timing.min_gap_ms", self.min_gap_ms)?;

        Ok(())
    }
}

// @const: Largest duration or gap a config may hold (24 hours)
pub const MAX_CONFIG_MS: i64 = 24 * 60 * 60 * 1000;

// @validates: Millisecond setting lies in 0..=MAX_CONFIG_MS
fn check_millis(field: &'static str, value: i64) -> Result<(), ConfigError> {
    if value < 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("must not be negative, got {}", value),
        });
    }

    if value > MAX_CONFIG_MS {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be at most {} (24 hours), got {}", MAX_CONFIG_MS, value),
        });
    }

    Ok(())
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_cps() -> f64 {
    DEFAULT_TARGET_CPS
}

fn default_min_duration_ms() -> i64 {
    DEFAULT_MIN_DURATION.as_millis()
}

fn default_max_duration_ms() -> i64 {
    DEFAULT_MAX_DURATION.as_millis()
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_max_gap_ms() -> i64 {
    DEFAULT_MAX_GAP_MS
}

fn default_min_gap_ms() -> i64 {
    DEFAULT_MIN_GAP_MS
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;

        if !(self.validation.max_cps.is_finite() && self.validation.max_cps > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "validation.max_cps",
                reason: format!("must be a positive number, got {}", self.validation.max_cps),
            });
        }

        if self.validation.min_duration_ms > self.validation.max_duration_ms {
            return Err(ConfigError::InvalidValue {
                field: "validation.max_duration_ms",
                reason: format!(
                    "must be at least min_duration_ms ({}), got {}",
                    self.validation.min_duration_ms, self.validation.max_duration_ms
                ),
            });
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Load the configuration, creating a default file if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}
