// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::enhance::EnhancementOp;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod archive;
mod document;
mod enhance;
mod errors;
mod file_utils;

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

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
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
    /// Apply enhancements to a text, file, directory, or archive (default command)
    #[command(alias = "apply")]
    Enhance(EnhanceArgs),

    /// Generate shell completions for tenhance
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct EnhanceArgs {
    /// Input text file, directory, or zip archive to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Enhance a text given directly on the command line, printing the result
    #[arg(long, conflicts_with = "input_path")]
    text: Option<String>,

    /// Enhancement operation as KIND=TARGET; repeat for several, applied in order
    #[arg(short, long = "enhance", value_name = "KIND=TARGET")]
    enhancements: Vec<String>,

    /// Directory to write enhanced output into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

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

/// tenhance - Text Enhancement Tool
///
/// Applies substring-targeted enhancements to texts: appending ellipses,
/// upper-casing and quoting, bracketing with emphasis markers, appending
/// a question mark, or wrapping in quotes.
#[derive(Parser, Debug)]
#[command(name = "tenhance")]
#[command(author = "tenhance contributors")]
#[command(version = "1.0.0")]
#[command(about = "Substring-targeted text enhancement tool")]
#[command(long_about = "tenhance replaces every occurrence of a target substring with an enhanced
version, applying the operations you give it strictly in order.

EXAMPLES:
    tenhance -e pause=world notes.txt            # world -> world... in notes.txt
    tenhance -e emphasize=hello --text 'hello there'
    tenhance -e quote=said -e question=why scripts.zip
    tenhance -e emotion=calm /texts/ -o out/     # every .txt under /texts/
    tenhance completions bash > tenhance.bash    # Generate bash completions

ENHANCEMENT KINDS:
    pause       append '...' to the target
    emphasize   upper-case the target and wrap it in double quotes
    emotion     wrap the target in ** markers
    question    append '?' to the target
    quote       wrap the target in double quotes

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The config selects whether the emphasis
    slot is 'emotion' (default) or the 'exclamation' variant.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file, directory, or zip archive to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Enhance a text given directly on the command line, printing the result
    #[arg(long, conflicts_with = "input_path")]
    text: Option<String>,

    /// Enhancement operation as KIND=TARGET; repeat for several, applied in order
    #[arg(short, long = "enhance", value_name = "KIND=TARGET")]
    enhancements: Vec<String>,

    /// Directory to write enhanced output into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

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

    // @returns: Fixed-width tag for log level
    fn tag_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                Self::tag_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tenhance", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Enhance(args)) => run_enhance(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let enhance_args = EnhanceArgs {
                input_path: cli.input_path,
                text: cli.text,
                enhancements: cli.enhancements,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_enhance(enhance_args)
        }
    }
}

fn run_enhance(options: EnhanceArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        let mut config = Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config.save_to_file(config_path)
            .context(format!("Failed to write default config: {}", config_path))?;

        config
    };

    // Apply the effective log level from config
    log::set_max_level(level_filter_for(&config.log_level));

    // Parse the ordered operation list; flag order is application order
    let ops = options
        .enhancements
        .iter()
        .map(|spec| EnhancementOp::parse(spec))
        .collect::<Result<Vec<_>>>()?;

    if ops.is_empty() {
        warn!("No enhancements given; output will equal the input.");
    }

    let controller = Controller::with_config(config)?;

    if let Some(text) = &options.text {
        let enhanced = controller.run_text(text, &ops)?;
        println!("{}", enhanced);
        return Ok(());
    }

    let input_path = options.input_path.ok_or_else(|| {
        anyhow!("INPUT_PATH or --text is required when no subcommand is specified")
    })?;

    controller.run(input_path, options.output_dir, &ops, options.force_overwrite)
}
