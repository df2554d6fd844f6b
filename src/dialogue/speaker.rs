/*!
 * Speaker tag heuristics.
 *
 * Decides whether a `Name:` style prefix is a real speaker label or just a
 * piece of prose that happens to end in a colon ("Note:", "First of all:").
 * The phrase list and limits are data, kept in [`SpeakerHeuristics`] so they
 * can be tuned from the configuration file.
 */

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Longest tag (in characters) still accepted as a speaker name
pub const DEFAULT_MAX_NAME_LENGTH: usize = 35;

/// Most words a normalized speaker name may contain
pub const DEFAULT_MAX_NAME_WORDS: usize = 4;

/// Lead-ins that look like `Name:` but are prose. Matched against the
/// lowercased, trimmed tag.
pub const DEFAULT_EXCLUDED_PHRASES: &[&str] = &[
    "the only problem", "note", "warning", "things", "and on the way we came across this",
    "this is the highest swing in europe", "and i swear", "which meant", "the only thing is",
    "and remember", "official distance", "first and foremost", "i said",
    "here we go", "next up", "step 1", "step 2", "step 3", "and step 3", "first up",
    "so the question is", "i was growing up", "you might be wondering", "update",
    "nashville to miami", "all i know is", "unlike judy", "the good news is",
    "aer lingus seat", "the true test is", "just as i suspected", "like i said",
    "star review and said", "i told them all", "and best of all", "the point is",
    "americans", "i was thinking", "and they go", "first of all", "second",
    "are you like", "as a reminder", "round 1", "round 2", "round 3", "round 4",
    "round 5", "welcome to round 3", "the question is", "quick reminder",
    "in 2nd place", "coming up", "first stop", "next step", "and that means",
    "hashtag", "so to be clear", "your second word", "welcome to round 6",
    "battle finale time", "number 1", "number 2", "but the truth is",
    "score to beat", "and your winner", "\"crafty\" and \"betcha\". coming up",
    "next one", "keep in mind", "and it says", "you could say", "welcome to round 2",
    "and the best part", "onto round 2", "the ride we chose", "good news is",
    "bad news", "good news", "he thought", "3 teams remain",
];

static DEFAULT_HEURISTICS: Lazy<SpeakerHeuristics> = Lazy::new(SpeakerHeuristics::default);

/// Tunable inputs of the speaker tag predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerHeuristics {
    /// Phrases that are never speakers (stored lowercased)
    #[serde(default = "default_excluded_phrases", deserialize_with = "deserialize_phrases")]
    pub excluded_phrases: BTreeSet<String>,

    /// Maximum tag length in characters
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Maximum word count after normalization
    #[serde(default = "default_max_name_words")]
    pub max_name_words: usize,
}

impl Default for SpeakerHeuristics {
    fn default() -> Self {
        Self {
            excluded_phrases: default_excluded_phrases(),
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            max_name_words: DEFAULT_MAX_NAME_WORDS,
        }
    }
}

impl SpeakerHeuristics {
    /// Build heuristics from a custom phrase list with the default limits.
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_phrases: normalize_phrases(phrases),
            ..Self::default()
        }
    }

    /// Add phrases on top of the current set.
    pub fn exclude<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_phrases.extend(normalize_phrases(phrases));
        self
    }

    /// Whether `tag` (without its trailing colon) looks like a speaker name.
    ///
    /// The phrase check runs before the length and word-count checks: several
    /// excluded phrases are short enough to pass those.
    pub fn is_valid_speaker_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }

        if self.excluded_phrases.contains(&tag.to_lowercase()) {
            return false;
        }

        if tag.chars().count() > self.max_name_length {
            return false;
        }

        let normalized = normalize_tag(tag);
        if normalized.is_empty() {
            return false;
        }

        let mut words = normalized.split_whitespace();
        let first_word = match words.next() {
            Some(word) => word,
            None => return false,
        };
        if 1 + words.count() > self.max_name_words {
            return false;
        }

        // Names are assumed to start capitalized (or with a non-letter)
        match first_word.chars().next() {
            Some(c) if c.is_alphabetic() && c.is_lowercase() => false,
            _ => true,
        }
    }
}

/// Check a tag against the built-in heuristics.
pub fn is_valid_speaker_tag(tag: &str) -> bool {
    DEFAULT_HEURISTICS.is_valid_speaker_tag(tag)
}

/// Collapse "A and B" / "A & B" so joint speakers count their names only.
fn normalize_tag(tag: &str) -> String {
    tag.replace(" and ", " ")
        .replace(" and", "")
        .replace('&', " ")
        .trim()
        .to_string()
}

fn normalize_phrases<I, S>(phrases: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

fn deserialize_phrases<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let phrases = Vec::<String>::deserialize(deserializer)?;
    Ok(normalize_phrases(phrases))
}

fn default_excluded_phrases() -> BTreeSet<String> {
    normalize_phrases(DEFAULT_EXCLUDED_PHRASES.iter())
}

fn default_max_name_length() -> usize {
    DEFAULT_MAX_NAME_LENGTH
}

fn default_max_name_words() -> usize {
    DEFAULT_MAX_NAME_WORDS
}
