/*!
 * SRT to dialogue parsing.
 *
 * The pipeline is: split the text into cue blocks, pull the timecode out of
 * each block, cut every dialogue line into text / `Name: ` segments, then run
 * the segments through an accumulator that decides who is speaking and emits
 * records in source order.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{DialogueRecord, TimeRange, UNKNOWN_SPEAKER};
use super::speaker::SpeakerHeuristics;

// @const: Whitespace run containing at least one blank line
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

// @const: SRT timecode line, anchored at the start only
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3}) --> (\d{2}:\d{2}:\d{2},\d{3})").unwrap()
});

// @const: Candidate speaker tag, delimiter kept by the segmenter
static SPEAKER_CANDIDATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w\s&]+?: ").unwrap()
});

/// Split subtitle text into trimmed cue blocks.
///
/// Blocks are separated by any whitespace run that contains a blank line.
/// Empty blocks are not returned.
pub fn split_blocks(text: &str) -> Vec<&str> {
    BLOCK_SEPARATOR_REGEX
        .split(text.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Extract the cue timing from a timecode line.
///
/// Returns `None` when the line does not start with
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm`. Values are not range-checked.
pub fn extract_time_range(line: &str) -> Option<TimeRange> {
    let caps = TIMECODE_REGEX.captures(line.trim())?;
    Some(TimeRange::new(&caps[1], &caps[2]))
}

/// Split a dialogue line into alternating text and candidate-tag segments.
///
/// Every `Name: ` delimiter is kept as its own element, so the result always
/// starts and ends with a (possibly empty) text segment.
pub fn segment_line(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in SPEAKER_CANDIDATE_REGEX.find_iter(line) {
        segments.push(&line[last..m.start()]);
        segments.push(m.as_str());
        last = m.end();
    }
    segments.push(&line[last..]);

    segments
}

/// A trimmed segment ending in a colon, with something before the colon
fn is_tag_candidate(segment: &str) -> bool {
    segment.len() > 1 && segment.ends_with(':')
}

/// Speaker bookkeeping for a single parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    last_known_speaker: String,
    current_dialogue: String,
    block_initial_speaker: String,
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseState {
    pub fn new() -> Self {
        Self {
            last_known_speaker: UNKNOWN_SPEAKER.to_string(),
            current_dialogue: String::new(),
            block_initial_speaker: UNKNOWN_SPEAKER.to_string(),
        }
    }

    /// Speaker of the most recently emitted record
    pub fn last_known_speaker(&self) -> &str {
        &self.last_known_speaker
    }

    /// Speaker that untagged text at the top of the current block falls back to
    pub fn block_initial_speaker(&self) -> &str {
        &self.block_initial_speaker
    }

    /// Text waiting to be flushed
    pub fn pending_dialogue(&self) -> &str {
        &self.current_dialogue
    }

    fn begin_block(&mut self) {
        self.current_dialogue.clear();
        self.block_initial_speaker.clone_from(&self.last_known_speaker);
    }

    fn append_text(&mut self, text: &str) {
        if !self.current_dialogue.is_empty() {
            self.current_dialogue.push(' ');
        }
        self.current_dialogue.push_str(text);
    }
}

/// Result of a parse, with block counts for callers that want to see drops.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Records in source order
    pub records: Vec<DialogueRecord>,

    /// Non-empty blocks found in the input
    pub blocks_seen: usize,

    /// Blocks skipped for a short line count or a bad timecode line
    pub blocks_dropped: usize,

    /// Speaker state after the last block
    pub state: ParseState,
}

/// Merges segments into records and resolves who said what.
struct Accumulator<'h> {
    heuristics: &'h SpeakerHeuristics,
    state: ParseState,
    records: Vec<DialogueRecord>,
}

impl<'h> Accumulator<'h> {
    fn new(heuristics: &'h SpeakerHeuristics) -> Self {
        Self {
            heuristics,
            state: ParseState::new(),
            records: Vec::new(),
        }
    }

    fn process_block(&mut self, range: &TimeRange, dialogue_lines: &[&str]) {
        self.state.begin_block();

        for line in dialogue_lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let segments = segment_line(line);
            let mut i = 0;
            while i < segments.len() {
                let segment = segments[i].trim();
                i += 1;

                if segment.is_empty() {
                    continue;
                }

                if !is_tag_candidate(segment) {
                    self.state.append_text(segment);
                    continue;
                }

                let tag = segment[..segment.len() - 1].trim();
                // The segment after a candidate belongs to it, valid or not
                let following = segments.get(i).map_or("", |s| s.trim());
                i += 1;

                if self.heuristics.is_valid_speaker_tag(tag) {
                    self.flush(range);

                    if !following.is_empty() {
                        self.emit(range, tag, following);
                    }

                    if self.state.block_initial_speaker == self.state.last_known_speaker {
                        self.state.block_initial_speaker = tag.to_string();
                    }
                } else {
                    let recombined = format!("{} {}", segment, following);
                    self.state.append_text(&recombined);
                }
            }
        }

        self.flush(range);
    }

    /// Emit the buffered text, if any, under the resolved speaker.
    fn flush(&mut self, range: &TimeRange) {
        if self.state.current_dialogue.is_empty() {
            return;
        }

        let speaker = self.resolve_speaker(range).to_string();
        let dialogue = std::mem::take(&mut self.state.current_dialogue);
        self.emit(range, &speaker, &dialogue);
    }

    /// Buffered text continues the last speaker only if the last record shares
    /// this block's start; otherwise it belongs to the block's initial speaker.
    fn resolve_speaker(&self, range: &TimeRange) -> &str {
        match self.records.last() {
            Some(last) if last.start() == range.start => &self.state.last_known_speaker,
            _ => &self.state.block_initial_speaker,
        }
    }

    fn emit(&mut self, range: &TimeRange, speaker: &str, dialogue: &str) {
        self.records.push(DialogueRecord::new(range, speaker, dialogue));
        self.state.last_known_speaker = speaker.to_string();
    }
}

/// Heuristic SRT dialogue parser.
///
/// Holds only the immutable heuristics; every call to [`DialogueParser::parse`]
/// starts from a fresh [`ParseState`], so one parser can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct DialogueParser {
    heuristics: SpeakerHeuristics,
}

impl DialogueParser {
    pub fn new(heuristics: SpeakerHeuristics) -> Self {
        Self { heuristics }
    }

    /// Parse SRT text into speaker-attributed dialogue records.
    pub fn parse(&self, text: &str) -> Vec<DialogueRecord> {
        self.parse_detailed(text).records
    }

    /// Parse and also report how many blocks were seen and dropped.
    pub fn parse_detailed(&self, text: &str) -> ParseOutcome {
        let mut accumulator = Accumulator::new(&self.heuristics);
        let blocks = split_blocks(text);
        let mut blocks_dropped = 0;

        for (index, block) in blocks.iter().enumerate() {
            let lines: Vec<&str> = block.split('\n').collect();
            if lines.len() < 3 {
                debug!("Skipping block {}: only {} line(s)", index + 1, lines.len());
                blocks_dropped += 1;
                continue;
            }

            let range = match extract_time_range(lines[1]) {
                Some(range) => range,
                None => {
                    debug!("Skipping block {}: no timecode in {:?}", index + 1, lines[1].trim());
                    blocks_dropped += 1;
                    continue;
                }
            };

            accumulator.process_block(&range, &lines[2..]);
        }

        debug!(
            "Parsed {} record(s) from {} block(s), {} dropped",
            accumulator.records.len(),
            blocks.len(),
            blocks_dropped
        );

        ParseOutcome {
            records: accumulator.records,
            blocks_seen: blocks.len(),
            blocks_dropped,
            state: accumulator.state,
        }
    }
}

/// Parse SRT text with the default heuristics.
pub fn parse_srt(text: &str) -> Vec<DialogueRecord> {
    DialogueParser::default().parse(text)
}
