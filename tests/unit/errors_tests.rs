/*!
 * Tests for error types
 */

use srtdialog::errors::{AppError, ColorError, ConfigError, ExportError};

#[test]
fn test_configError_display_shouldNameField() {
    let error = ConfigError::InvalidValue {
        field: "palette.size".to_string(),
        reason: "must be between 1 and 1000".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid configuration value for palette.size: must be between 1 and 1000"
    );
}

#[test]
fn test_exportError_fromColorError_shouldWrap() {
    let error: ExportError = ColorError::EmptyPalette { saturation: 1.0, value: 0.1 }.into();
    assert!(matches!(error, ExportError::Color(_)));
    assert!(error.to_string().starts_with("Color allocation failed:"));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(ref msg) if msg == "gone"));
}

#[test]
fn test_appError_fromConfigError_shouldKeepMessage() {
    let error: AppError = ConfigError::ParseError("bad".to_string()).into();
    assert_eq!(
        error.to_string(),
        "Configuration error: Failed to parse configuration: bad"
    );
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(_)));
}

#[test]
fn test_exportError_outputExists_shouldIncludePath() {
    let error = ExportError::OutputExists("/tmp/a.dialogue.tsv".to_string());
    assert!(error.to_string().contains("/tmp/a.dialogue.tsv"));
}
