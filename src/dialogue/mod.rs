/*!
 * Speaker-attributed dialogue extraction from SRT text.
 *
 * - `model`: record and timing types
 * - `speaker`: heuristics that tell speaker tags from prose
 * - `parser`: block splitting, segmentation and speaker resolution
 */

pub mod model;
pub mod parser;
pub mod speaker;

pub use self::model::{DialogueRecord, TimeRange, UNKNOWN_SPEAKER};
pub use self::parser::{
    extract_time_range, parse_srt, segment_line, split_blocks, DialogueParser, ParseOutcome,
    ParseState,
};
pub use self::speaker::{is_valid_speaker_tag, SpeakerHeuristics};
