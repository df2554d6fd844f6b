/*!
 * Error types for the srtdialog application.
 *
 * Parsing itself never fails: malformed cues are skipped and unknown
 * speakers fall back to a sentinel. These errors cover configuration,
 * palette generation, export and file handling around the parser.
 */

use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Errors from the speaker color palette
#[derive(Error, Debug, PartialEq)]
pub enum ColorError {
    /// Every sampled color was rejected as too dark or too light
    #[error("Color palette is empty (saturation {saturation}, value {value})")]
    EmptyPalette {
        saturation: f64,
        value: f64,
    },
}

/// Errors while rendering or writing an export
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization failed
    #[error("Failed to serialize records: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Could not allocate speaker colors
    #[error("Color allocation failed: {0}")]
    Color(#[from] ColorError),

    /// The output file already exists and overwriting was not requested
    #[error("Output file already exists: {0}")]
    OutputExists(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from an export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
