/*!
 * Record types produced by the dialogue parser.
 *
 * Timestamps are kept as the verbatim `HH:MM:SS,mmm` strings found in the
 * source; nothing here converts them to numeric time.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker attributed to dialogue when no valid tag has been seen yet.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Start and end timestamps of a cue, as found in the timecode line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start timestamp (`HH:MM:SS,mmm`)
    pub start: String,

    /// End timestamp (`HH:MM:SS,mmm`)
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.start, self.end)
    }
}

/// One line of attributed dialogue.
///
/// Records are only built by the parser at a flush point and are read-only
/// afterwards. `dialogue` keeps any inline markup exactly as it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRecord {
    start: String,
    end: String,
    speaker: String,
    dialogue: String,
}

impl DialogueRecord {
    pub(crate) fn new(range: &TimeRange, speaker: &str, dialogue: &str) -> Self {
        Self {
            start: range.start.clone(),
            end: range.end.clone(),
            speaker: speaker.to_string(),
            dialogue: dialogue.to_string(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn dialogue(&self) -> &str {
        &self.dialogue
    }

    /// The cue timing this record belongs to
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start.clone(), self.end.clone())
    }

    /// Whether the speaker is the `Unknown` sentinel
    pub fn is_unattributed(&self) -> bool {
        self.speaker == UNKNOWN_SPEAKER
    }
}

impl fmt::Display for DialogueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} --> {}] {}: {}", self.start, self.end, self.speaker, self.dialogue)
    }
}
