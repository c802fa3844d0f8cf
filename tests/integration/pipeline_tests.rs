/*!
 * End-to-end correction pipeline tests
 */

use subalign::subtitle_codec::{format_srt, parse_srt};
use tokio_test;

use crate::common;

/// The corrected track keeps entry count, indices and timecodes while
/// replacing the text with script content
#[test]
fn test_correctText_shouldReplaceTextAndKeepStructure() {
    let controller = common::default_controller();
    let result = controller
        .correct_text(&common::sample_script(), &common::sample_srt())
        .unwrap();

    assert_eq!(result.corrected.len(), result.original.len());
    for (before, after) in result.original.iter().zip(result.corrected.iter()) {
        assert_eq!(before.index, after.index);
        assert_eq!(before.start, after.start);
        assert_eq!(before.end, after.end);
        assert!(after.line_count() <= before.line_count());
    }

    // The transcription error "天汽" is replaced by the script's "天气"
    assert_eq!(result.corrected[0].text_lines, vec!["<b>今天天气很好。</b>"]);
    assert_eq!(result.corrected[1].text_lines, vec!["<b>我们去公园。</b>"]);
    assert!(result.outcome.unmatched_tail.is_empty());
}

/// Serialized output parses again into the same structure
#[test]
fn test_correctText_outputRemainsWellFormed() {
    let controller = common::default_controller();
    let result = controller
        .correct_text(&common::sample_script(), &common::sample_srt())
        .unwrap();

    let output = format_srt(&result.corrected);
    let reparsed = parse_srt(&output).unwrap();
    assert_eq!(reparsed.len(), result.corrected.len());
    assert_eq!(format_srt(&reparsed), output);
}

/// Two runs over identical input produce identical output
#[test]
fn test_correctText_isDeterministic() {
    let controller = common::default_controller();
    let first = controller
        .correct_text(&common::sample_script(), &common::sample_srt())
        .unwrap();
    let second = controller
        .correct_text(&common::sample_script(), &common::sample_srt())
        .unwrap();

    assert_eq!(format_srt(&first.corrected), format_srt(&second.corrected));
}

/// A malformed subtitle input fails the whole pipeline with no output
#[test]
fn test_correctText_withMalformedSubtitle_shouldFail() {
    let controller = common::default_controller();
    let result = controller.correct_text(&common::sample_script(), "1\nnot a timecode\n<b>x</b>\n");
    assert!(result.is_err());
}

/// A script with no sentences fails before alignment
#[test]
fn test_correctText_withEmptyScript_shouldFail() {
    let controller = common::default_controller();
    let result = controller.correct_text("# 只有标题", &common::sample_srt());
    assert!(result.is_err());
}

/// File-based run writes the corrected SRT and the diff report
#[tokio::test]
async fn test_run_withFiles_shouldWriteOutputs() {
    let dir = tempfile::tempdir().unwrap();
    let script_path = dir.path().join("script.md");
    let srt_path = dir.path().join("input.srt");
    let out_path = dir.path().join("out/corrected.srt");
    let report_path = dir.path().join("report.diff");

    std::fs::write(&script_path, common::sample_script()).unwrap();
    std::fs::write(&srt_path, common::sample_srt()).unwrap();

    let controller = common::default_controller();
    controller
        .run(&script_path, &srt_path, &out_path, Some(&report_path), false)
        .await
        .unwrap();

    let output = std::fs::read_to_string(&out_path).unwrap();
    let entries = parse_srt(&output).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text_lines, vec!["<b>今天天气很好。</b>"]);

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.starts_with("--- original\n+++ corrected\n"));
    assert!(report.contains("@@ entry 1"));
    assert!(report.contains("-<b>今天天汽很好。</b>"));
    assert!(report.contains("+<b>今天天气很好。</b>"));
}

/// Existing output without --force is refused
#[test]
fn test_run_withExistingOutput_shouldRefuseWithoutForce() {
    let dir = tempfile::tempdir().unwrap();
    let script_path = dir.path().join("script.md");
    let srt_path = dir.path().join("input.srt");
    let out_path = dir.path().join("corrected.srt");

    std::fs::write(&script_path, common::sample_script()).unwrap();
    std::fs::write(&srt_path, common::sample_srt()).unwrap();
    std::fs::write(&out_path, "existing").unwrap();

    let controller = common::default_controller();
    let result = tokio_test::block_on(async {
        controller
            .run(&script_path, &srt_path, &out_path, None, false)
            .await
    });
    assert!(result.is_err());

    // With force the run succeeds and replaces the file
    tokio_test::block_on(async {
        controller
            .run(&script_path, &srt_path, &out_path, None, true)
            .await
    })
    .unwrap();
    assert_ne!(std::fs::read_to_string(&out_path).unwrap(), "existing");
}
