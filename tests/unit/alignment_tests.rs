/*!
 * Tests for the alignment engine
 */

use subalign::alignment::{OverflowPolicy, align};
use subalign::script_normalizer::prepare;
use subalign::simplifier::Simplifier;
use subalign::subtitle_codec::SubtitleEntry;

fn entry(index: usize, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(
        index,
        "00:00:01,000",
        "00:00:02,000",
        vec![format!("<b>{}</b>", text)],
    )
}

/// Scenario: two sentences onto two approximately matching entries must map
/// one-to-one, not merge both into the first entry.
#[test]
fn test_align_withOneToOneMatch_shouldNotMerge() {
    let simplifier = Simplifier::default();
    let sentences = prepare("今天天气很好。我们去公园。", &simplifier).unwrap();
    let entries = vec![entry(1, "今天天汽很好。"), entry(2, "我们去公园。")];

    let outcome = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::LeaveBlank);

    assert_eq!(outcome.assignments.len(), 2);
    assert_eq!(outcome.assignments[0].span, 0..1);
    assert_eq!(outcome.assignments[0].text, "今天天气很好。");
    assert_eq!(outcome.assignments[1].span, 1..2);
    assert_eq!(outcome.assignments[1].text, "我们去公园。");
    assert!(outcome.unmatched_tail.is_empty());
    assert!(outcome.overflow_entries.is_empty());
}

/// Scenario: three sentences, two entries, second entry matching sentences
/// 2+3 concatenated must select window size 2.
#[test]
fn test_align_withMergedTarget_shouldSelectWiderWindow() {
    let simplifier = Simplifier::default();
    let sentences = prepare("今天天气很好。我们去公园。一起玩吧。", &simplifier).unwrap();
    let entries = vec![entry(1, "今天天气很好。"), entry(2, "我们去公园一起玩吧")];

    let outcome = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::LeaveBlank);

    assert_eq!(outcome.assignments[0].span, 0..1);
    assert_eq!(outcome.assignments[1].span, 1..3);
    assert_eq!(outcome.assignments[1].text, "我们去公园。一起玩吧。");
    assert!(outcome.unmatched_tail.is_empty());
}

/// Scenario: more entries than sentences flags the trailing entries through
/// the overflow policy instead of crashing.
#[test]
fn test_align_withMoreEntriesThanSentences_shouldApplyOverflowPolicy() {
    let simplifier = Simplifier::default();
    let sentences = prepare("只有一句话。", &simplifier).unwrap();
    let entries = vec![entry(1, "只有一句话。"), entry(2, "第二条"), entry(3, "第三条")];

    let blank = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::LeaveBlank);
    assert_eq!(blank.assignments.len(), 3);
    assert_eq!(blank.overflow_entries, vec![1, 2]);
    assert_eq!(blank.assignments[1].text, "");
    assert_eq!(blank.assignments[2].text, "");

    let repeat = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::RepeatPrevious);
    assert_eq!(repeat.assignments[1].text, "只有一句话。");
    assert_eq!(repeat.assignments[2].text, "只有一句话。");
    assert_eq!(repeat.overflow_entries, vec![1, 2]);
}

/// The spans read in entry order must exactly partition a prefix of the
/// sentence sequence with no gaps and no overlaps.
#[test]
fn test_align_partitionProperty_shouldHold() {
    let simplifier = Simplifier::default();
    let script = "第一句话说完了。第二句话也说了。第三句再来一遍。第四句快结束。最后一句话。";
    let sentences = prepare(script, &simplifier).unwrap();
    let entries = vec![
        entry(1, "第一句话说完了"),
        entry(2, "第二句话也说了第三句再来一遍"),
        entry(3, "第四句快结束"),
    ];

    let outcome = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::LeaveBlank);

    let mut cursor = 0;
    for assignment in &outcome.assignments {
        assert_eq!(assignment.span.start, cursor, "gap or overlap at {:?}", assignment.span);
        cursor = assignment.span.end;
    }
    assert_eq!(outcome.consumed(), cursor);

    // Unmatched tail is exactly the sentences past the final cursor
    let expected_tail: Vec<usize> = (cursor..sentences.len()).collect();
    assert_eq!(outcome.unmatched_tail, expected_tail);
}

/// Unconsumed trailing sentences must be reported, never silently dropped
#[test]
fn test_align_withLeftoverSentences_shouldReportUnmatchedTail() {
    let simplifier = Simplifier::default();
    let sentences = prepare("第一句。第二句。第三句。", &simplifier).unwrap();
    let entries = vec![entry(1, "第一句")];

    let outcome = align(&sentences, &entries, &simplifier, 1, OverflowPolicy::LeaveBlank);

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.unmatched_tail, vec![1, 2]);
}

/// Entry count invariance holds regardless of the sentence supply
#[test]
fn test_align_entryCountInvariance() {
    let simplifier = Simplifier::default();
    let sentences = prepare("一句。两句。", &simplifier).unwrap();
    for entry_count in 1..6 {
        let entries: Vec<SubtitleEntry> =
            (1..=entry_count).map(|i| entry(i, "一句")).collect();
        let outcome = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::LeaveBlank);
        assert_eq!(outcome.assignments.len(), entries.len());
    }
}

/// An entry whose text simplifies to nothing receives an empty span and does
/// not consume any sentences
#[test]
fn test_align_withEmptyTarget_shouldKeepCursor() {
    let simplifier = Simplifier::default();
    let sentences = prepare("第一句。第二句。", &simplifier).unwrap();
    let entries = vec![entry(1, "第一句"), entry(2, ""), entry(3, "第二句")];

    let outcome = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::LeaveBlank);

    assert_eq!(outcome.assignments[1].span, 1..1);
    assert_eq!(outcome.assignments[1].text, "");
    assert_eq!(outcome.assignments[2].span, 1..2);
    assert!(outcome.overflow_entries.is_empty());
}

/// Running the engine twice on identical input produces identical output
#[test]
fn test_align_isDeterministic() {
    let simplifier = Simplifier::default();
    let sentences = prepare("今天天气很好。我们去公园。一起玩吧。", &simplifier).unwrap();
    let entries = vec![entry(1, "今天天汽很好"), entry(2, "我们去公园一起玩")];

    let first = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::RepeatPrevious);
    let second = align(&sentences, &entries, &simplifier, 4, OverflowPolicy::RepeatPrevious);
    assert_eq!(first, second);
}
