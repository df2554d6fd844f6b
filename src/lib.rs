/*!
 * # srtdialog - speaker-attributed dialogue from SRT subtitles
 *
 * A Rust library that turns SubRip subtitle text into an ordered list of
 * timed dialogue lines, each attributed to a speaker.
 *
 * ## Features
 *
 * - Heuristic recognition of inline `Name:` speaker tags
 * - Speaker carry-over across cues without an explicit tag
 * - Multiple speakers per cue
 * - Markup flattening (`<i>whisper</i>` becomes `(whisper)`)
 * - Stable per-speaker terminal colors
 * - JSON, TSV, script and colored preview exports
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `dialogue`: the parser:
 *   - `dialogue::model`: records and time ranges
 *   - `dialogue::speaker`: speaker tag heuristics
 *   - `dialogue::parser`: block splitting, segmentation and attribution
 * - `markup`: subtitle markup flattening
 * - `colors`: per-speaker color allocation
 * - `export`: output formats and speaker statistics
 * - `file_utils`: file system operations and decoding
 * - `app_config`: configuration management
 * - `app_controller`: main application controller
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod colors;
pub mod dialogue;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod markup;

// Re-export main types for easier usage
pub use app_config::{Config, OutputFormat};
pub use app_controller::Controller;
pub use dialogue::{parse_srt, DialogueParser, DialogueRecord, SpeakerHeuristics, TimeRange};
pub use errors::{AppError, ColorError, ConfigError, ExportError};
pub use markup::strip_markup;
