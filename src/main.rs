// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use srtdialog::app_config::{self, Config, OutputFormat};
use srtdialog::app_controller::Controller;

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Json,
    Tsv,
    Script,
    Preview,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Tsv => OutputFormat::Tsv,
            CliOutputFormat::Script => OutputFormat::Script,
            CliOutputFormat::Preview => OutputFormat::Preview,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Options shared by every command that reads subtitles
#[derive(Parser, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Subtitle file or directory of .srt files to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Directory for exported files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(long)]
    force_overwrite: bool,

    /// Flatten <i>/<b>/<u> markup in JSON and script output
    #[arg(long)]
    strip_markup: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct SpeakersArgs {
    /// Subtitle file to summarize
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract speaker-attributed dialogue from subtitles
    #[command(alias = "p")]
    Parse(ParseArgs),

    /// List the speakers recognized in a subtitle file
    Speakers(SpeakersArgs),

    /// Generate shell completions for srtdialog
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// srtdialog - speaker-attributed dialogue from SRT subtitles
#[derive(Parser, Debug)]
#[command(name = "srtdialog")]
#[command(version)]
#[command(about = "Extract speaker-attributed dialogue from SRT subtitles")]
#[command(long_about = "srtdialog reads SubRip subtitles, recognizes inline `Name:` speaker tags
and exports the dialogue line by line with its timing and speaker.

EXAMPLES:
    srtdialog parse episode.srt                    # Write episode.dialogue.tsv
    srtdialog parse -f json -o out/ episode.srt    # JSON export into out/
    srtdialog parse -f preview episode.srt         # Colored script on the terminal
    srtdialog parse --force-overwrite season1/     # Every .srt file in a directory
    srtdialog speakers episode.srt                 # Who speaks, and how often
    srtdialog completions bash > srtdialog.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Accept everything here; the effective level is applied once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtdialog", &mut std::io::stdout());
            Ok(())
        }
        Commands::Parse(args) => run_parse(args),
        Commands::Speakers(args) => run_speakers(args),
    }
}

// @loads: Config file, with the command line log level applied on top
fn load_config(common: &CommonArgs) -> Result<Config> {
    // Command line level applies immediately so config loading is logged with it
    if let Some(cli_level) = common.log_level {
        let level: app_config::LogLevel = cli_level.into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_default(&common.config_path)?;

    if let Some(cli_level) = common.log_level {
        config.log_level = cli_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

fn run_parse(options: ParseArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;

    if let Some(format) = options.format {
        config.export.format = format.into();
    }
    if options.strip_markup {
        config.export.strip_markup = true;
    }

    let format = config.export.format;
    let controller = Controller::with_config(config)?;
    let output_dir = options.output_dir.as_deref();

    if options.input_path.is_file() {
        controller.run(&options.input_path, output_dir, format, options.force_overwrite)?;
    } else if options.input_path.is_dir() {
        controller.run_folder(&options.input_path, output_dir, format, options.force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

fn run_speakers(options: SpeakersArgs) -> Result<()> {
    let config = load_config(&options.common)?;
    let controller = Controller::with_config(config)?;

    let stats = controller
        .speaker_stats(&options.input_path)
        .with_context(|| format!("Failed to read speakers from {:?}", options.input_path))?;

    println!("{}", stats);
    Ok(())
}
