use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::dialogue::SpeakerHeuristics;
use crate::errors::ConfigError;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Speaker tag heuristics
    #[serde(default)]
    pub speakers: SpeakerHeuristics,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Speaker color palette settings
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output format for parsed dialogue
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    // @format: Pretty-printed JSON array
    Json,
    // @format: Tab-separated Start/End/Speaker/Dialogue table
    #[default]
    Tsv,
    // @format: Plain-text script grouped by cue
    Script,
    // @format: Script with ANSI-colored speakers, printed to the terminal
    Preview,
}

impl OutputFormat {
    // @returns: File extension used for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Tsv => "tsv",
            Self::Script | Self::Preview => "txt",
        }
    }

    // @returns: Lowercase format identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Json => "json".to_string(),
            Self::Tsv => "tsv".to_string(),
            Self::Script => "script".to_string(),
            Self::Preview => "preview".to_string(),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "tsv" => Ok(Self::Tsv),
            "script" | "txt" => Ok(Self::Script),
            "preview" => Ok(Self::Preview),
            _ => Err(anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Export configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Flatten markup in JSON and script output (TSV is always flattened)
    #[serde(default)]
    pub strip_markup: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            strip_markup: false,
        }
    }
}

/// Speaker color palette configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Number of distinct colors per generated palette
    #[serde(default = "default_palette_size")]
    pub size: usize,

    /// HSV saturation of every color
    #[serde(default = "default_saturation")]
    pub saturation: f64,

    /// HSV value of every color
    #[serde(default = "default_value")]
    pub value: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            size: default_palette_size(),
            saturation: default_saturation(),
            value: default_value(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
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
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

// Upper bound on palette size; s/v fixed hues only yield about a thousand distinct colors
const MAX_PALETTE_SIZE: usize = 1000;

fn default_palette_size() -> usize {
    150
}

fn default_saturation() -> f64 {
    0.8
}

fn default_value() -> f64 {
    0.9
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.speakers.max_name_length == 0 {
            return Err(invalid("speakers.max_name_length", "must be greater than zero"));
        }

        if self.speakers.max_name_words == 0 {
            return Err(invalid("speakers.max_name_words", "must be greater than zero"));
        }

        if self.palette.size == 0 || self.palette.size > MAX_PALETTE_SIZE {
            return Err(invalid(
                "palette.size",
                &format!("must be between 1 and {}", MAX_PALETTE_SIZE),
            ));
        }

        if !(self.palette.saturation > 0.0 && self.palette.saturation <= 1.0) {
            return Err(invalid("palette.saturation", "must be in (0, 1]"));
        }

        if !(self.palette.value > 0.0 && self.palette.value <= 1.0) {
            return Err(invalid("palette.value", "must be in (0, 1]"));
        }

        Ok(())
    }

    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load the configuration file, or write the defaults there if it is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .map_err(|e| ConfigError::ParseError(e.to_string()))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }
}
