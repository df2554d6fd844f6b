/*!
 * Common test utilities for the srtdialog test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Three cues: two speakers in the first, carry-over and a new tag after that
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
John: <i>Hello</i> there. Mary: Hi John!

2
00:00:05,000 --> 00:00:09,000
How have you been?

3
00:00:10,000 --> 00:00:14,000
John: Busy.
Note: the meeting moved.
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Build one SRT cue
pub fn cue(index: usize, start: &str, end: &str, text: &str) -> String {
    format!("{}\n{} --> {}\n{}\n", index, start, end, text)
}

/// Route `log` output to the test harness; safe to call more than once
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
