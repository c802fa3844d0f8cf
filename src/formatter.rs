/*!
 * Subtitle line re-wrapping.
 *
 * Takes the text assigned to a slot and the original entry's line shape and
 * re-wraps it into bold-tagged lines. The output line count never exceeds the
 * original entry's line count, and the original wrapping style (per-line tags
 * vs one shared span across the block) is reproduced.
 */

use serde::{Deserialize, Serialize};

/// Characters considered acceptable line-break points
const BREAK_CHARS: &str = "，,。.!！？?；;：:、…—―“”\"'（）()《》〈〉-　 ";

/// How the original entry wrapped its text in bold markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWrapStyle {
    /// One text line, wrapped whole
    SingleLine,

    /// Every line individually wrapped in its own tag pair
    PerLineMarkup,

    /// One tag pair spanning the whole multi-line block
    SharedMarkupBlock,
}

/// Detect the wrapping style of an entry's original text lines.
///
/// Detection happens once per entry; the resulting tag is threaded through
/// formatting instead of re-sniffing the lines.
pub fn detect_wrap_style(lines: &[String]) -> LineWrapStyle {
    if lines.len() <= 1 {
        return LineWrapStyle::SingleLine;
    }

    let first = lines.first().map(|l| l.trim()).unwrap_or("");
    let last = lines.last().map(|l| l.trim()).unwrap_or("");
    let shared = first.starts_with("<b>") && !first.contains("</b>") && last.ends_with("</b>");
    if shared {
        LineWrapStyle::SharedMarkupBlock
    } else {
        LineWrapStyle::PerLineMarkup
    }
}

/// Tunables for line re-wrapping
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WrapOptions {
    /// Target characters per line before a break is sought
    pub line_char_budget: usize,

    /// How far from the target position a break character is searched
    pub break_tolerance: usize,
}

impl Default for WrapOptions {
    fn default() -> Self {
        WrapOptions {
            line_char_budget: 14,
            break_tolerance: 8,
        }
    }
}

/// Re-wrap assigned text into bold-tagged lines for one entry.
///
/// A single-line original yields exactly one wrapped line. A multi-line
/// original yields at most `line_count` lines (never more) via a greedy fill
/// against the per-line budget, preferring to break at punctuation within the
/// tolerance window. Empty text yields a single empty tag pair, never zero
/// lines.
pub fn format_entry(
    assigned_text: &str,
    line_count: usize,
    style: LineWrapStyle,
    options: WrapOptions,
) -> Vec<String> {
    let text = assigned_text.trim();
    if text.is_empty() {
        return vec!["<b></b>".to_string()];
    }

    if line_count <= 1 || style == LineWrapStyle::SingleLine {
        return vec![format!("<b>{}</b>", text)];
    }

    let segments = split_segments(text, line_count, options);
    apply_markup(&segments, style)
}

/// Greedily split text into at most `line_count` segments
fn split_segments(text: &str, line_count: usize, options: WrapOptions) -> Vec<String> {
    let budget = options.line_char_budget.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut segments: Vec<String> = Vec::with_capacity(line_count);
    let mut cursor = 0;

    while cursor < chars.len() && segments.len() < line_count {
        let remainder = &chars[cursor..];
        let is_last_slot = segments.len() == line_count - 1;
        if is_last_slot || remainder.len() <= budget {
            push_segment(&mut segments, remainder);
            break;
        }
        let split_at = find_line_split(remainder, budget, options.break_tolerance);
        push_segment(&mut segments, &remainder[..split_at]);
        cursor += split_at;
    }

    if segments.is_empty() {
        segments.push(text.to_string());
    }
    segments
}

fn push_segment(segments: &mut Vec<String>, chars: &[char]) {
    let segment: String = chars.iter().collect();
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}

/// Find the best position to split a chunk: the nearest break character to the
/// target position within the tolerance window, searching forward first, then
/// backward, falling back to a hard break at the target.
fn find_line_split(chunk: &[char], target: usize, tolerance: usize) -> usize {
    let target = target.clamp(1, chunk.len() - 1);

    for offset in 0..=tolerance {
        let idx = target + offset;
        if idx < chunk.len() && BREAK_CHARS.contains(chunk[idx - 1]) {
            return idx;
        }
    }
    for offset in 0..=tolerance {
        let idx = target.saturating_sub(offset);
        if idx > 0 && BREAK_CHARS.contains(chunk[idx - 1]) {
            return idx;
        }
    }
    target
}

/// Wrap segments in bold markup according to the detected style
fn apply_markup(segments: &[String], style: LineWrapStyle) -> Vec<String> {
    match style {
        LineWrapStyle::SingleLine | LineWrapStyle::PerLineMarkup => segments
            .iter()
            .map(|segment| format!("<b>{}</b>", segment))
            .collect(),
        LineWrapStyle::SharedMarkupBlock => {
            if segments.len() == 1 {
                return vec![format!("<b>{}</b>", segments[0])];
            }
            segments
                .iter()
                .enumerate()
                .map(|(idx, segment)| {
                    if idx == 0 {
                        format!("<b>{}", segment)
                    } else if idx == segments.len() - 1 {
                        format!("{}</b>", segment)
                    } else {
                        segment.clone()
                    }
                })
                .collect()
        }
    }
}
