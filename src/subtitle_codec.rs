/*!
 * SRT subtitle model and codec.
 *
 * Parses raw SRT text into structured entries and serializes entries back to
 * text with the same blank-line-delimited block structure. Index and timecode
 * values are pass-through strings: parsing validates their shape but the codec
 * never recomputes them.
 */

use std::fmt;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// SRT timecode line, e.g. "00:00:22,699 --> 00:00:24,533"
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})$").unwrap()
});

// Inline markup tags such as <b> and </b>
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Single subtitle entry (one cue)
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    /// Original sequence number, re-emitted unchanged
    pub index: usize,

    /// Start timecode in HH:MM:SS,mmm form, pass-through
    pub start: String,

    /// End timecode in HH:MM:SS,mmm form, pass-through
    pub end: String,

    /// Original text lines, still carrying their markup wrapping
    pub text_lines: Vec<String>,
}

impl SubtitleEntry {
    /// Create a new subtitle entry
    pub fn new(index: usize, start: impl Into<String>, end: impl Into<String>, text_lines: Vec<String>) -> Self {
        SubtitleEntry {
            index,
            start: start.into(),
            end: end.into(),
            text_lines,
        }
    }

    /// Number of text lines in the original entry; constrains output re-wrapping
    pub fn line_count(&self) -> usize {
        self.text_lines.len()
    }

    /// Text content with markup tags and all whitespace removed
    pub fn plain_text(&self) -> String {
        let joined = self.text_lines.join("\n");
        let stripped = TAG_REGEX.replace_all(&joined, "");
        stripped.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Parse an SRT timecode (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timecode_ms(timecode: &str) -> Result<u64> {
        let parts: Vec<&str> = timecode.split(&[':', ','][..]).collect();
        if parts.len() != 4 {
            return Err(anyhow!("Invalid timecode format: {}", timecode));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!("Invalid time components in timecode: {}", timecode));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Cue duration in milliseconds
    pub fn duration_ms(&self) -> Result<u64> {
        let start = Self::parse_timecode_ms(&self.start)?;
        let end = Self::parse_timecode_ms(&self.end)?;
        Ok(end.saturating_sub(start))
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        write!(f, "{} --> {}", self.start, self.end)?;
        for line in &self.text_lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Parse SRT text into subtitle entries.
///
/// Each blank-line-delimited block must contain an index line, a timecode line
/// and at least one text line. Any structural defect fails with a
/// [`SubtitleError::MalformedBlock`] naming the block position; there is no
/// partial recovery.
pub fn parse_srt(text: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
    let normalized = text.replace("\r\n", "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Err(SubtitleError::Empty);
    }

    let mut entries = Vec::new();
    let mut position = 0;
    for block in trimmed.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            // Runs of blank lines produce empty segments between blocks
            continue;
        }
        position += 1;
        entries.push(parse_block(block, position)?);
    }

    if entries.is_empty() {
        return Err(SubtitleError::Empty);
    }

    Ok(entries)
}

/// Parse a single three-part SRT block
fn parse_block(block: &str, position: usize) -> Result<SubtitleEntry, SubtitleError> {
    let lines: Vec<&str> = block.lines().collect();
    if lines.len() < 3 {
        return Err(SubtitleError::MalformedBlock {
            block: position,
            reason: "expected index line, timecode line and at least one text line".to_string(),
        });
    }

    let index: usize = lines[0].trim().parse().map_err(|_| SubtitleError::MalformedBlock {
        block: position,
        reason: format!("non-numeric index line: {:?}", lines[0]),
    })?;

    let timecode = lines[1].trim();
    let caps = TIMECODE_REGEX.captures(timecode).ok_or_else(|| SubtitleError::MalformedBlock {
        block: position,
        reason: format!("malformed timecode line: {:?}", timecode),
    })?;
    let start = caps[1].to_string();
    let end = caps[2].to_string();

    let text_lines: Vec<String> = lines[2..].iter().map(|line| line.to_string()).collect();

    // Opening and closing bold tags must balance within a block
    let joined = text_lines.join("\n");
    let opens = joined.matches("<b>").count();
    let closes = joined.matches("</b>").count();
    if opens != closes {
        return Err(SubtitleError::MalformedBlock {
            block: position,
            reason: format!("unterminated markup: {} <b> vs {} </b>", opens, closes),
        });
    }

    Ok(SubtitleEntry::new(index, start, end, text_lines))
}

/// Serialize entries back to SRT text.
///
/// Blocks are re-emitted in order, blank-line separated, with a single
/// trailing newline. No field is recomputed.
pub fn format_srt(entries: &[SubtitleEntry]) -> String {
    let blocks: Vec<String> = entries.iter().map(|entry| entry.to_string()).collect();
    format!("{}\n", blocks.join("\n\n"))
}
