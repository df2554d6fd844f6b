/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use srtdialog::app_config::{Config, LogLevel, OutputFormat, PaletteConfig};
use srtdialog::dialogue::SpeakerHeuristics;
use srtdialog::errors::ConfigError;
use crate::common;

/// Test that the default configuration is valid
#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.export.format, OutputFormat::Tsv);
    assert!(!config.export.strip_markup);
    assert_eq!(config.palette.size, 150);
    assert_eq!(config.palette.saturation, 0.8);
    assert_eq!(config.palette.value, 0.9);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test validation of the speaker limits
#[test]
fn test_validate_withZeroNameLimits_shouldFail() {
    let mut config = Config::default();
    config.speakers.max_name_length = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { ref field, .. }) if field == "speakers.max_name_length"
    ));

    let mut config = Config::default();
    config.speakers.max_name_words = 0;
    assert!(config.validate().is_err());
}

/// Test validation of palette bounds
#[test]
fn test_validate_withPaletteOutOfRange_shouldFail() {
    for palette in [
        PaletteConfig { size: 0, ..PaletteConfig::default() },
        PaletteConfig { size: 1001, ..PaletteConfig::default() },
        PaletteConfig { saturation: 0.0, ..PaletteConfig::default() },
        PaletteConfig { value: 1.5, ..PaletteConfig::default() },
        PaletteConfig { value: f64::NAN, ..PaletteConfig::default() },
    ] {
        let config = Config { palette, ..Config::default() };
        assert!(config.validate().is_err(), "accepted {:?}", config.palette);
    }

    let config = Config {
        palette: PaletteConfig { size: 1000, saturation: 1.0, value: 1.0 },
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

/// Test that partial JSON is completed with defaults
#[test]
fn test_fromJson_withPartialConfig_shouldFillDefaults() {
    let config = Config::from_json(
        r#"{
            "export": { "format": "json" },
            "speakers": { "excluded_phrases": ["Narrator"], "max_name_words": 2 },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    assert_eq!(config.export.format, OutputFormat::Json);
    assert!(!config.export.strip_markup);
    assert_eq!(config.speakers.max_name_words, 2);
    assert_eq!(config.speakers.max_name_length, 35);
    assert!(config.speakers.excluded_phrases.contains("narrator"));
    assert!(!config.speakers.excluded_phrases.contains("note"));
    assert_eq!(config.palette, PaletteConfig::default());
    assert_eq!(config.log_level, LogLevel::Debug);
}

/// Test that malformed JSON is reported as a parse error
#[test]
fn test_fromJson_withInvalidJson_shouldReturnParseError() {
    let result = Config::from_json("{ not json");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));

    let result = Config::from_json(r#"{"export": {"format": "xlsx"}}"#);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

/// Test that a missing config file is created with defaults
#[test]
fn test_loadOrDefault_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_default(&path)?;

    assert_eq!(config, Config::default());
    assert!(path.exists());
    let written = Config::from_json(&std::fs::read_to_string(&path)?)?;
    assert_eq!(written, Config::default());
    Ok(())
}

/// Test that an existing config file is loaded as-is
#[test]
fn test_loadOrDefault_withExistingFile_shouldLoadIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = Config::default();
    config.speakers = SpeakerHeuristics::with_phrases(["Host"]);
    config.export.strip_markup = true;

    let path = temp_dir.path().join("custom.json");
    config.save(&path)?;

    let loaded = Config::load_or_default(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

/// Test that a broken config file is an error, not silently replaced
#[test]
fn test_loadOrDefault_withCorruptFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ broken")?;

    assert!(Config::load_or_default(&path).is_err());
    assert_eq!(std::fs::read_to_string(&path)?, "{ broken");
    Ok(())
}

/// Test output format parsing and display
#[test]
fn test_outputFormat_fromStrAndDisplay_shouldAgree() {
    for format in [OutputFormat::Json, OutputFormat::Tsv, OutputFormat::Script, OutputFormat::Preview] {
        let parsed: OutputFormat = format.to_string().parse().unwrap();
        assert_eq!(parsed, format);
    }
    assert_eq!(OutputFormat::Script.extension(), "txt");
}
