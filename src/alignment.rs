/*!
 * Greedy script-to-subtitle alignment.
 *
 * Maps the ordered script sentence sequence onto the ordered subtitle slots in
 * a single left-to-right pass. Subtitle timecodes and sentence order are both
 * authoritative, so the problem reduces to a monotone partitioning: a cursor
 * walks the sentence sequence and each entry claims the best-scoring
 * contiguous window of sentences at the cursor. Bounding the window size keeps
 * the pass linear in the number of entries.
 */

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::script_normalizer::ScriptSentence;
use crate::simplifier::Simplifier;
use crate::subtitle_codec::SubtitleEntry;

/// Fallback for entries left over after the sentence sequence is exhausted
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Leave the trailing entries blank
    LeaveBlank,

    /// Carry the previous entry's assigned text forward
    #[default]
    RepeatPrevious,
}

/// Span of script sentences assigned to one subtitle slot
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Contiguous half-open range into the sentence sequence; empty when no
    /// sentences remained for this entry
    pub span: Range<usize>,

    /// Concatenated original text of the span, possibly substituted by the
    /// overflow policy for entries past exhaustion
    pub text: String,
}

/// Result of one alignment pass
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentOutcome {
    /// One assignment per subtitle entry, in entry order
    pub assignments: Vec<Assignment>,

    /// Indices of sentences left unconsumed after all entries were assigned
    pub unmatched_tail: Vec<usize>,

    /// Indices of entries assigned after the sentence sequence ran out
    pub overflow_entries: Vec<usize>,
}

impl AlignmentOutcome {
    /// Final cursor position: the length of the consumed sentence prefix
    pub fn consumed(&self) -> usize {
        self.assignments.iter().map(|a| a.span.end).max().unwrap_or(0)
    }
}

/// Align script sentences onto subtitle entries.
///
/// For each entry in original order, candidate windows of `1..=window_max`
/// sentences at the cursor are scored against the entry's simplified text and
/// the best window wins; ties prefer the smallest window so later entries keep
/// their sentences available. The cursor never moves backwards, so the spans
/// read in entry order exactly partition a prefix of the sentence sequence.
///
/// Entries reached after the sentences are exhausted receive an empty span and
/// text chosen by `policy`; their indices are reported, as are any unconsumed
/// trailing sentences. Neither condition is an error.
pub fn align(
    sentences: &[ScriptSentence],
    entries: &[SubtitleEntry],
    simplifier: &Simplifier,
    window_max: usize,
    policy: OverflowPolicy,
) -> AlignmentOutcome {
    let window_max = window_max.max(1);
    let mut assignments: Vec<Assignment> = Vec::with_capacity(entries.len());
    let mut overflow_entries = Vec::new();
    let mut cursor = 0;

    for (entry_idx, entry) in entries.iter().enumerate() {
        if cursor >= sentences.len() {
            overflow_entries.push(entry_idx);
            let text = match policy {
                OverflowPolicy::LeaveBlank => String::new(),
                OverflowPolicy::RepeatPrevious => {
                    assignments.last().map(|a| a.text.clone()).unwrap_or_default()
                }
            };
            assignments.push(Assignment { span: cursor..cursor, text });
            continue;
        }

        let target = simplifier.simplify(&entry.text_lines.join("\n"));
        if target.is_empty() {
            // Nothing to match against: keep the cursor where it is
            assignments.push(Assignment { span: cursor..cursor, text: String::new() });
            continue;
        }

        let limit = window_max.min(sentences.len() - cursor);
        let mut window_simplified = String::new();
        let mut best_width = 1;
        let mut best_score = f64::MIN;
        for width in 1..=limit {
            window_simplified.push_str(&sentences[cursor + width - 1].simplified);
            let score = lcs_ratio(&window_simplified, &target);
            // Strict comparison keeps the smallest window on ties
            if score > best_score {
                best_score = score;
                best_width = width;
            }
        }

        let span = cursor..cursor + best_width;
        let text: String = sentences[span.clone()]
            .iter()
            .map(|sentence| sentence.original.as_str())
            .collect();
        cursor = span.end;
        assignments.push(Assignment { span, text });
    }

    let unmatched_tail: Vec<usize> = (cursor..sentences.len()).collect();

    AlignmentOutcome {
        assignments,
        unmatched_tail,
        overflow_entries,
    }
}

/// Similarity of two strings in `[0, 1]`: twice the length of their longest
/// common subsequence over their combined length. Symmetric and deterministic.
pub fn lcs_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Two-row DP for space efficiency
    let mut prev_row: Vec<usize> = vec![0; b_chars.len() + 1];
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for &a_char in &a_chars {
        for (j, &b_char) in b_chars.iter().enumerate() {
            curr_row[j + 1] = if a_char == b_char {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let lcs_len = prev_row[b_chars.len()];
    (2 * lcs_len) as f64 / (a_chars.len() + b_chars.len()) as f64
}
