use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, OutputFormat};
use crate::dialogue::{DialogueParser, ParseOutcome};
use crate::errors::ExportError;
use crate::export::{self, SpeakerStats};
use crate::file_utils::{FileManager, FileType};

// @module: Application controller for subtitle processing

// @const: Middle part of every export file name
const OUTPUT_SUFFIX: &str = "dialogue";

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Export written to this path
    Written(PathBuf),
    /// Export printed to stdout
    Printed,
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Counts from a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller: parse subtitle files and export the dialogue
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Parser built from the configured heuristics
    parser: DialogueParser,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let parser = DialogueParser::new(config.speakers.clone());
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read, decode and parse one subtitle file
    pub fn parse_file<P: AsRef<Path>>(&self, input_file: P) -> Result<ParseOutcome> {
        let input_file = input_file.as_ref();
        let decoded = FileManager::read_subtitle_file(input_file)
            .with_context(|| format!("Failed to load subtitles from {}", input_file.display()))?;

        let outcome = self.parser.parse_detailed(&decoded.text);
        if outcome.blocks_dropped > 0 {
            debug!(
                "{}: {} of {} block(s) skipped as malformed",
                input_file.display(),
                outcome.blocks_dropped,
                outcome.blocks_seen
            );
        }

        Ok(outcome)
    }

    /// Speaker summary for one subtitle file
    pub fn speaker_stats<P: AsRef<Path>>(&self, input_file: P) -> Result<SpeakerStats> {
        let outcome = self.parse_file(input_file)?;
        Ok(SpeakerStats::from_records(&outcome.records))
    }

    /// Parse one file and export it.
    ///
    /// The export lands in `output_dir`, or next to the input when `None`.
    /// Preview output goes to stdout instead of a file.
    pub fn run(
        &self,
        input_file: &Path,
        output_dir: Option<&Path>,
        format: OutputFormat,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        if FileManager::detect_file_type(input_file)? != FileType::Subtitle {
            return Err(anyhow!("Not an SRT subtitle file: {:?}", input_file));
        }

        let output_path = if format == OutputFormat::Preview {
            None
        } else {
            let dir = output_dir
                .map(Path::to_path_buf)
                .or_else(|| input_file.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));
            let path = FileManager::generate_output_path(input_file, dir, OUTPUT_SUFFIX, format.extension());

            if path.exists() && !force_overwrite {
                warn!(
                    "{}",
                    ExportError::OutputExists(path.display().to_string())
                );
                return Ok(FileOutcome::Skipped(path));
            }
            Some(path)
        };

        let outcome = self.parse_file(input_file)?;
        let stats = SpeakerStats::from_records(&outcome.records);
        let rendered = export::render(&outcome.records, format, &self.config.export, &self.config.palette)
            .with_context(|| format!("Failed to export {}", input_file.display()))?;

        info!(
            "{}: {} record(s), {} speaker(s)",
            input_file.display(),
            stats.total_records,
            stats.speaker_count()
        );

        match output_path {
            Some(path) => {
                FileManager::write_to_file(&path, &rendered)?;
                info!("Success: {:?}", path);
                Ok(FileOutcome::Written(path))
            }
            None => {
                print!("{}", rendered);
                Ok(FileOutcome::Printed)
            }
        }
    }

    /// Export every `.srt` file below `input_dir`
    pub fn run_folder(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        format: OutputFormat,
        force_overwrite: bool,
    ) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let subtitle_files = FileManager::find_files(input_dir, "srt")?;
        if subtitle_files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(subtitle_files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("#>-"));

        let mut summary = FolderSummary::default();

        for subtitle_file in &subtitle_files {
            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            // Mirror the input tree when exporting elsewhere
            let target_dir = match (output_dir, subtitle_file.parent()) {
                (Some(out), Some(parent)) => {
                    let relative = parent.strip_prefix(input_dir).unwrap_or(Path::new(""));
                    Some(out.join(relative))
                }
                (Some(out), None) => Some(out.to_path_buf()),
                (None, _) => None,
            };

            match self.run(subtitle_file, target_dir.as_deref(), format, force_overwrite) {
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Ok(_) => summary.processed += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.errors
        );

        Ok(summary)
    }
}
