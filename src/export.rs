/*!
 * Rendering of parsed dialogue for output.
 *
 * Formats:
 * - JSON: records as parsed (optionally with markup flattened)
 * - TSV: spreadsheet-friendly table, markup always flattened
 * - Script: cue header followed by `Speaker:<TAB>dialogue` lines
 * - Preview: script with each speaker label in its own terminal color
 */

use rand::Rng;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::fmt::Write;

use crate::app_config::{ExportConfig, OutputFormat, PaletteConfig};
use crate::colors::ColorAllocator;
use crate::dialogue::{DialogueRecord, UNKNOWN_SPEAKER};
use crate::errors::ExportError;
use crate::markup::strip_markup;

/// Column header of the TSV export
pub const TSV_HEADER: &str = "Start\tEnd\tSpeaker\tDialogue";

/// Render `records` in the configured format.
///
/// Preview output gets a fresh color allocator per call.
pub fn render(
    records: &[DialogueRecord],
    format: OutputFormat,
    export: &ExportConfig,
    palette: &PaletteConfig,
) -> Result<String, ExportError> {
    match format {
        OutputFormat::Json => to_json(records, export.strip_markup),
        OutputFormat::Tsv => Ok(to_tsv(records)),
        OutputFormat::Script => Ok(to_script(records, export.strip_markup)),
        OutputFormat::Preview => {
            let mut allocator = ColorAllocator::new(palette)?;
            to_preview(records, export.strip_markup, &mut allocator)
        }
    }
}

/// Pretty JSON array of records.
pub fn to_json(records: &[DialogueRecord], strip: bool) -> Result<String, ExportError> {
    if !strip {
        return Ok(serde_json::to_string_pretty(records)?);
    }

    let flattened: Vec<DialogueRecord> = records
        .iter()
        .map(|r| DialogueRecord::new(&r.time_range(), r.speaker(), &strip_markup(r.dialogue())))
        .collect();
    Ok(serde_json::to_string_pretty(&flattened)?)
}

/// Tab-separated table with a header row; dialogue markup is flattened.
pub fn to_tsv(records: &[DialogueRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 64);
    out.push_str(TSV_HEADER);
    out.push('\n');

    for record in records {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            tsv_field(record.start()),
            tsv_field(record.end()),
            tsv_field(record.speaker()),
            tsv_field(&strip_markup(record.dialogue()))
        );
    }

    out
}

fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

/// Plain-text script grouped by cue.
pub fn to_script(records: &[DialogueRecord], strip: bool) -> String {
    let Ok(script) = render_script(records, strip, |speaker| {
        Ok::<_, Infallible>(format!("{}:", speaker))
    });
    script
}

/// Script with every speaker label in a 24-bit ANSI color.
pub fn to_preview<R: Rng>(
    records: &[DialogueRecord],
    strip: bool,
    allocator: &mut ColorAllocator<R>,
) -> Result<String, ExportError> {
    render_script(records, strip, |speaker| -> Result<String, ExportError> {
        let color = allocator.color_for(speaker)?;
        Ok(format!(
            "\x1B[1;38;2;{};{};{}m{}:\x1B[0m",
            color.r, color.g, color.b, speaker
        ))
    })
}

fn render_script<F, E>(records: &[DialogueRecord], strip: bool, mut label: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut out = String::new();
    let mut current_cue: Option<(&str, &str)> = None;

    for record in records {
        let cue = (record.start(), record.end());
        if current_cue != Some(cue) {
            if current_cue.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{} --> {}", cue.0, cue.1);
            current_cue = Some(cue);
        }

        let dialogue = if strip {
            strip_markup(record.dialogue())
        } else {
            record.dialogue().to_string()
        };
        let _ = writeln!(out, "{}\t{}", label(record.speaker())?, dialogue);
    }

    Ok(out)
}

/// Record count for one speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerCount {
    pub name: String,
    pub records: usize,
}

/// Who speaks in a parsed file, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerStats {
    /// All records
    pub total_records: usize,

    /// Records left with the `Unknown` sentinel
    pub unattributed_records: usize,

    /// Recognized speakers (never `Unknown`)
    pub speakers: Vec<SpeakerCount>,
}

impl SpeakerStats {
    pub fn from_records(records: &[DialogueRecord]) -> Self {
        let mut stats = SpeakerStats {
            total_records: records.len(),
            ..Default::default()
        };

        for record in records {
            let speaker = record.speaker();
            if speaker == UNKNOWN_SPEAKER || speaker.is_empty() {
                stats.unattributed_records += 1;
                continue;
            }

            match stats.speakers.iter_mut().find(|s| s.name == speaker) {
                Some(entry) => entry.records += 1,
                None => stats.speakers.push(SpeakerCount {
                    name: speaker.to_string(),
                    records: 1,
                }),
            }
        }

        stats
    }

    /// Number of recognized speakers
    pub fn speaker_count(&self) -> usize {
        self.speakers.len()
    }

    pub fn speaker_names(&self) -> Vec<&str> {
        self.speakers.iter().map(|s| s.name.as_str()).collect()
    }
}

impl fmt::Display for SpeakerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total recognized speakers: {}", self.speaker_count())?;
        if self.speakers.is_empty() {
            writeln!(f, "No clear speakers found.")?;
        } else {
            writeln!(f, "List of speakers: {}", self.speaker_names().join(", "))?;
            for speaker in &self.speakers {
                writeln!(f, "  {}: {} line(s)", speaker.name, speaker.records)?;
            }
        }
        write!(
            f,
            "Records: {} ({} unattributed)",
            self.total_records, self.unattributed_records
        )
    }
}
