/*!
 * Human-review diagnostics.
 *
 * Renders a unified-diff-style summary of original vs corrected entry text so
 * a reviewer can inspect what the alignment changed, plus counts for the
 * non-fatal alignment conditions (unmatched tail, overflow entries).
 */

use std::fmt::Write;

use crate::alignment::AlignmentOutcome;
use crate::subtitle_codec::SubtitleEntry;

/// Render a diff-style report of the changes made to a subtitle track.
///
/// Only changed entries produce a hunk; each hunk is headed by the entry's
/// index and timecode. The summary footer reports changed-entry,
/// unmatched-sentence and overflow-entry counts.
pub fn build_report(
    original: &[SubtitleEntry],
    corrected: &[SubtitleEntry],
    outcome: &AlignmentOutcome,
) -> String {
    let mut report = String::new();
    report.push_str("--- original\n");
    report.push_str("+++ corrected\n");

    let mut changed = 0;
    for (before, after) in original.iter().zip(corrected.iter()) {
        if before.text_lines == after.text_lines {
            continue;
        }
        changed += 1;
        let _ = writeln!(report, "@@ entry {} ({} --> {}) @@", before.index, before.start, before.end);
        for line in &before.text_lines {
            let _ = writeln!(report, "-{}", line);
        }
        for line in &after.text_lines {
            let _ = writeln!(report, "+{}", line);
        }
    }

    let _ = writeln!(report, "# changed entries: {}/{}", changed, original.len());
    let _ = writeln!(report, "# unmatched trailing sentences: {}", outcome.unmatched_tail.len());
    if !outcome.overflow_entries.is_empty() {
        let positions: Vec<String> = outcome
            .overflow_entries
            .iter()
            .map(|idx| original.get(*idx).map_or((idx + 1).to_string(), |e| e.index.to_string()))
            .collect();
        let _ = writeln!(report, "# entries past sentence exhaustion: {}", positions.join(", "));
    }

    report
}
