// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod alignment;
mod app_config;
mod app_controller;
mod diff_report;
mod errors;
mod file_utils;
mod formatter;
mod providers;
mod rewrite;
mod script_normalizer;
mod simplifier;
mod subtitle_codec;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Correct an SRT subtitle file against a reference script (default command)
    Align(AlignArgs),

    /// Generate shell completions for subalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AlignArgs {
    /// Reference script file (Markdown)
    #[arg(long, value_name = "SCRIPT_PATH")]
    script: PathBuf,

    /// Original erroneous SRT file
    #[arg(long, value_name = "SRT_PATH")]
    srt: PathBuf,

    /// Corrected SRT output path
    #[arg(short, long, value_name = "OUT_PATH")]
    out: PathBuf,

    /// Optional diff report output path
    #[arg(long, value_name = "REPORT_PATH")]
    report: Option<PathBuf>,

    /// Run the dialect rewrite pre-pass before aligning
    #[arg(long)]
    rewrite: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subalign - Script-to-Subtitle Alignment
///
/// Corrects transcribed SRT subtitles against a reference Markdown script
/// while preserving entry count, timecodes and markup structure.
#[derive(Parser, Debug)]
#[command(name = "subalign")]
#[command(version = "0.1.0")]
#[command(about = "Correct SRT subtitles against a reference script")]
#[command(long_about = "subalign aligns a Markdown reference script against a timestamped SRT
subtitle track and replaces each entry's text with the corrected script text.

EXAMPLES:
    subalign --script ep01.md --srt ep01.srt -o ep01.fixed.srt
    subalign --script ep01.md --srt ep01.srt -o out.srt --report out.diff
    subalign --script ep01.md --srt ep01.srt -o out.srt --rewrite   # dialect rewrite first
    subalign completions bash > subalign.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Reference script file (Markdown)
    #[arg(long, value_name = "SCRIPT_PATH")]
    script: Option<PathBuf>,

    /// Original erroneous SRT file
    #[arg(long, value_name = "SRT_PATH")]
    srt: Option<PathBuf>,

    /// Corrected SRT output path
    #[arg(short, long, value_name = "OUT_PATH")]
    out: Option<PathBuf>,

    /// Optional diff report output path
    #[arg(long, value_name = "REPORT_PATH")]
    report: Option<PathBuf>,

    /// Run the dialect rewrite pre-pass before aligning
    #[arg(long)]
    rewrite: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subalign", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Align(args)) => run_align(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let script = cli
                .script
                .ok_or_else(|| anyhow!("--script is required when no subcommand is specified"))?;
            let srt = cli
                .srt
                .ok_or_else(|| anyhow!("--srt is required when no subcommand is specified"))?;
            let out = cli
                .out
                .ok_or_else(|| anyhow!("--out is required when no subcommand is specified"))?;

            let align_args = AlignArgs {
                script,
                srt,
                out,
                report: cli.report,
                rewrite: cli.rewrite,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_align(align_args).await
        }
    }
}

async fn run_align(options: AlignArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.rewrite {
        config.rewrite.enabled = true;
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller
        .run(
            &options.script,
            &options.srt,
            &options.out,
            options.report.as_deref(),
            options.force_overwrite,
        )
        .await
}
