/*!
 * Canonical text simplification for similarity scoring.
 *
 * Maps any text span to a comparison form: markup removed, whitespace deleted,
 * punctuation stripped, full-width characters folded, and a finite
 * variant-character table applied. The simplified form is used only for
 * scoring; output always comes from the original text.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

// Inline markup tags such as <b> and </b>
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// CJK punctuation stripped before comparison. ASCII punctuation is handled
/// separately via `char::is_ascii_punctuation`.
const CJK_PUNCTUATION: &str = "。、，！？；：…‥—―·・「」『』《》〈〉（）【】〔〕“”‘’〜～";

/// Character-variant substitutions applied by default.
///
/// A finite lookup of commonly confused transcription pairs, not a general
/// simplified/traditional converter. Callers can inject their own table
/// through [`Simplifier::new`].
pub const DEFAULT_VARIANT_PAIRS: &[(char, char)] = &[
    ('她', '他'),
    ('它', '他'),
    ('妳', '你'),
    ('喔', '哦'),
    ('欸', '诶'),
    ('誒', '诶'),
    ('嘛', '吗'),
    ('曚', '蒙'),
];

/// Text simplifier with an injected variant-character table
#[derive(Debug, Clone)]
pub struct Simplifier {
    /// Immutable character substitution table
    variant_table: HashMap<char, char>,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new(DEFAULT_VARIANT_PAIRS.iter().copied().collect())
    }
}

impl Simplifier {
    /// Create a simplifier with a custom variant table
    pub fn new(variant_table: HashMap<char, char>) -> Self {
        Simplifier { variant_table }
    }

    /// Create a simplifier from string-keyed pairs, e.g. from configuration.
    ///
    /// Pairs whose key or value is not exactly one character are ignored.
    pub fn from_string_pairs(pairs: &HashMap<String, String>) -> Self {
        let table = pairs
            .iter()
            .filter_map(|(from, to)| {
                let mut from_chars = from.chars();
                let mut to_chars = to.chars();
                match (from_chars.next(), from_chars.next(), to_chars.next(), to_chars.next()) {
                    (Some(f), None, Some(t), None) => Some((f, t)),
                    _ => None,
                }
            })
            .collect();
        Simplifier { variant_table: table }
    }

    /// Map text to its canonical comparison form.
    ///
    /// Deterministic: identical input always yields identical output. Note
    /// that whitespace is deleted outright, not collapsed, since the target
    /// language is whitespace-insensitive for matching.
    pub fn simplify(&self, text: &str) -> String {
        let without_tags = TAG_REGEX.replace_all(text, "");

        let mut out = String::with_capacity(without_tags.len());
        for c in without_tags.chars() {
            if c.is_whitespace() {
                continue;
            }
            let folded = fold_width(c);
            if folded.is_ascii_punctuation() || CJK_PUNCTUATION.contains(folded) {
                continue;
            }
            let mapped = self.variant_table.get(&folded).copied().unwrap_or(folded);
            out.push(mapped);
        }
        out
    }
}

/// Fold full-width ASCII forms (U+FF01..U+FF5E) to their half-width
/// equivalents, so that "３" and "3" compare equal.
fn fold_width(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => {
            // Offset between the full-width block and printable ASCII
            char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
        }
        _ => c,
    }
}
