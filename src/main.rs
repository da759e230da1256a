// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::Write;
use std::path::PathBuf;

use subtime::app_config::{Config, LogLevel};
use subtime::subtitle_processor::SubtitleCollection;
use subtime::timing::transforms::ShiftOptions;
use subtime::timing::{Timestamp, TimingService};
use subtime::validation::{TimecodeValidationResult, TimecodeValidator};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Input and output files shared by every retiming command
#[derive(Args, Debug)]
struct IoArgs {
    /// Input SRT file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output SRT file (prints to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Move every line earlier or later (never below zero)
    Shift {
        #[command(flatten)]
        io: IoArgs,

        /// Offset, e.g. 1.5, -500ms or 00:00:02,000
        #[arg(allow_hyphen_values = true)]
        offset: Timestamp,

        /// Only move line starts
        #[arg(long, conflicts_with = "end_only")]
        start_only: bool,

        /// Only move line ends
        #[arg(long)]
        end_only: bool,
    },

    /// Scale timing around a reference point (e.g. 25/23.976 for film to PAL)
    Scale {
        #[command(flatten)]
        io: IoArgs,

        /// Scale factor; above 1 slows down, below 1 speeds up
        factor: f64,

        /// Pivot that stays in place
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        reference: Timestamp,
    },

    /// Map the first start and last end onto a new span
    Stretch {
        #[command(flatten)]
        io: IoArgs,

        /// New start of the first line
        new_start: Timestamp,

        /// New end of the last line
        new_end: Timestamp,
    },

    /// Set each line's duration from its reading speed
    AutoDuration {
        #[command(flatten)]
        io: IoArgs,

        /// Target characters per second
        #[arg(long)]
        cps: Option<f64>,

        /// Minimum duration in milliseconds
        #[arg(long)]
        min_ms: Option<i64>,

        /// Maximum duration in milliseconds
        #[arg(long)]
        max_ms: Option<i64>,
    },

    /// Snap every timestamp to the nearest video frame
    Snap {
        #[command(flatten)]
        io: IoArgs,

        /// Frame rate
        #[arg(long)]
        fps: Option<f64>,
    },

    /// Extend lines to close small gaps before the next line
    FillGaps {
        #[command(flatten)]
        io: IoArgs,

        /// Largest gap to close, in milliseconds
        #[arg(long)]
        max_gap_ms: Option<i64>,
    },

    /// Shorten lines so a minimum gap precedes the next line
    FixOverlaps {
        #[command(flatten)]
        io: IoArgs,

        /// Minimum gap to enforce, in milliseconds
        #[arg(long)]
        min_gap_ms: Option<i64>,
    },

    /// Check timecodes without changing anything
    Validate {
        /// Input SRT file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Generate shell completions for subtime
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subtime - subtitle timing transforms
///
/// Shift, scale, stretch, snap and clean up the timing of SRT subtitles.
#[derive(Parser, Debug)]
#[command(name = "subtime")]
#[command(version)]
#[command(about = "Subtitle timing transforms")]
#[command(long_about = "subtime retimes SRT subtitles.

EXAMPLES:
    subtime shift movie.srt -- -1.5 -o fixed.srt       # Everything 1.5s earlier
    subtime scale movie.srt 1.0427 -o pal.srt          # 23.976 -> 25 fps
    subtime stretch movie.srt 00:00:05,000 01:32:10,250
    subtime auto-duration movie.srt --cps 17
    subtime snap movie.srt --fps 25
    subtime fill-gaps movie.srt --max-gap-ms 250
    subtime fix-overlaps movie.srt
    subtime validate movie.srt
    subtime completions bash > subtime.bash

CONFIGURATION:
    Defaults can be stored in a JSON file passed with --config. If the file
    doesn't exist, a default one is created. Command flags override it.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The filter inside the logger stays open; log::set_max_level does the gating
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info by default, adjusted once options and config are known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subtime", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = match &cli.config_path {
        Some(path) => Config::load_or_create(path)?,
        None => Config::default(),
    };

    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    run(cli.command, config)
}

fn run(command: Commands, mut config: Config) -> Result<()> {
    if let Commands::Validate { input } = &command {
        config.validate().context("Configuration validation failed")?;
        let collection = SubtitleCollection::from_file(input)?;
        let report = TimecodeValidator::with_config(config.validation.clone())
            .validate_collection(&collection.entries);
        log_report(&report);

        if !report.passed {
            return Err(anyhow!(
                "{} of {} entries failed timecode validation",
                report.failed_lines().len(),
                collection.entries.len()
            ));
        }
        info!("All {} entries passed timecode validation", collection.entries.len());
        return Ok(());
    }

    // Command flags override configured defaults
    match &command {
        Commands::AutoDuration { cps, min_ms, max_ms, .. } => {
            if let Some(cps) = cps {
                config.timing.target_cps = *cps;
            }
            if let Some(min_ms) = min_ms {
                config.timing.min_duration_ms = *min_ms;
            }
            if let Some(max_ms) = max_ms {
                config.timing.max_duration_ms = *max_ms;
            }
        }
        Commands::Snap { fps: Some(fps), .. } => config.timing.fps = *fps,
        Commands::FillGaps { max_gap_ms: Some(gap), .. } => config.timing.max_gap_ms = *gap,
        Commands::FixOverlaps { min_gap_ms: Some(gap), .. } => config.timing.min_gap_ms = *gap,
        _ => {}
    }

    config.validate().context("Configuration validation failed")?;
    let service = TimingService::with_config(config.timing.clone());

    let (io, description) = match &command {
        Commands::Shift { io, .. } => (io, "shift"),
        Commands::Scale { io, .. } => (io, "scale"),
        Commands::Stretch { io, .. } => (io, "stretch"),
        Commands::AutoDuration { io, .. } => (io, "auto-duration"),
        Commands::Snap { io, .. } => (io, "snap"),
        Commands::FillGaps { io, .. } => (io, "fill-gaps"),
        Commands::FixOverlaps { io, .. } => (io, "fix-overlaps"),
        Commands::Validate { .. } | Commands::Completions { .. } => {
            return Err(anyhow!("Command does not retime subtitles"));
        }
    };

    let mut collection = SubtitleCollection::from_file(&io.input)?;
    debug!("Applying {} to {} entries", description, collection.entries.len());

    let lines = &mut collection.entries;
    match &command {
        Commands::Shift { offset, start_only, end_only, .. } => {
            let options = if *start_only {
                ShiftOptions::start_only()
            } else if *end_only {
                ShiftOptions::end_only()
            } else {
                ShiftOptions::default()
            };
            service.shift_with(lines, *offset, options);
        }
        Commands::Scale { factor, reference, .. } => service.scale(lines, *factor, *reference),
        Commands::Stretch { new_start, new_end, .. } => service.stretch(lines, *new_start, *new_end),
        Commands::AutoDuration { .. } => service.auto_duration_all(lines),
        Commands::Snap { .. } => service.snap_lines(lines),
        Commands::FillGaps { .. } => service.fill_gaps(lines),
        Commands::FixOverlaps { .. } => service.fix_overlaps(lines),
        Commands::Validate { .. } | Commands::Completions { .. } => {}
    }

    let report = TimecodeValidator::with_config(config.validation.clone())
        .validate_collection(&collection.entries);
    log_report(&report);

    match &io.output {
        Some(path) => {
            collection.write_to_srt(path)?;
            info!("Success: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(collection.to_srt_string().as_bytes())
                .context("Failed to write subtitles to stdout")?;
        }
    }

    Ok(())
}

// Helper function to summarize validation findings
fn log_report(report: &TimecodeValidationResult) {
    if report.total_issues == 0 {
        return;
    }

    warn!(
        "Timecode check: {} issues, {} overlaps",
        report.total_issues, report.overlap_count
    );
    for result in report.lines.iter().filter(|r| !r.issues.is_empty()).take(10) {
        for issue in &result.issues {
            warn!("  Line {}: {}", result.index + 1, issue);
        }
    }
}
