/*!
 * Reference script normalization.
 *
 * Turns raw Markdown script text into an ordered sequence of sentences,
 * stripped of heading lines and speaker labels. Order of emission equals
 * order of appearance; sentences are never reordered or deduplicated.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ScriptError;
use crate::simplifier::Simplifier;

// Bracketed speaker annotations, half- or full-width
static SPEAKER_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]]*\]|【[^】]*】").unwrap()
});

/// Sentence-final punctuation. The lookahead in [`split_sentences`] keeps the
/// punctuation on the emitted sentence.
const SENTENCE_ENDERS: &[char] = &['。', '．', '！', '？', '…', '!', '?', '.'];

/// One atomic unit of reference text
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSentence {
    /// Verbatim sentence text after markup/label stripping, used for output
    pub original: String,

    /// Canonical comparison form, used only for scoring
    pub simplified: String,
}

/// Normalize a Markdown script into an ordered sentence sequence.
///
/// Heading lines are dropped entirely, speaker labels are stripped wherever
/// they appear, then text is split first on paragraph boundaries and within
/// each paragraph on sentence-final punctuation. Fails with
/// [`ScriptError::NoSentences`] when nothing survives normalization.
pub fn prepare(markdown: &str, simplifier: &Simplifier) -> Result<Vec<ScriptSentence>, ScriptError> {
    let mut sentences = Vec::new();
    let mut paragraph = String::new();

    let flush = |paragraph: &mut String, sentences: &mut Vec<ScriptSentence>| {
        if !paragraph.trim().is_empty() {
            for fragment in split_sentences(paragraph) {
                sentences.push(ScriptSentence {
                    simplified: simplifier.simplify(&fragment),
                    original: fragment,
                });
            }
        }
        paragraph.clear();
    };

    for line in markdown.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut paragraph, &mut sentences);
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }
        let stripped = SPEAKER_LABEL_REGEX.replace_all(trimmed, "");
        let stripped = stripped.trim();
        if stripped.is_empty() {
            continue;
        }
        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(stripped);
    }
    flush(&mut paragraph, &mut sentences);

    if sentences.is_empty() {
        return Err(ScriptError::NoSentences);
    }

    Ok(sentences)
}

/// Split a paragraph on sentence-final punctuation, keeping the punctuation
/// attached to its sentence. Runs of enders (ellipses, "？！") stay together.
fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut chars = paragraph.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if SENTENCE_ENDERS.contains(&c) {
            let next_is_ender = chars.peek().is_some_and(|n| SENTENCE_ENDERS.contains(n));
            if !next_is_ender {
                push_fragment(&mut fragments, &mut current);
            }
        }
    }
    push_fragment(&mut fragments, &mut current);

    fragments
}

/// Move a non-empty trimmed fragment into the output list
fn push_fragment(fragments: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
    current.clear();
}
