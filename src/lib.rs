/*!
 * # subalign - Script-to-Subtitle Alignment
 *
 * A Rust library for correcting transcribed SRT subtitles against a reference
 * Markdown script.
 *
 * ## Features
 *
 * - Parse and serialize SRT subtitle files with strict structural validation
 * - Normalize Markdown scripts into ordered sentence sequences
 * - Fuzzy-align script sentences onto subtitle slots while preserving entry
 *   count, sequence numbers, timecodes and markup wrapping
 * - Re-wrap corrected text into bold-tagged lines matching the original shape
 * - Optional dialect rewrite pre-pass via an external provider
 * - Unified-diff-style review report of the applied corrections
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_codec`: SRT model, parser and serializer
 * - `script_normalizer`: Markdown script to sentence sequence
 * - `simplifier`: Canonical comparison form for similarity scoring
 * - `alignment`: Greedy sentence-window alignment engine
 * - `formatter`: Line re-wrapping with markup-style preservation
 * - `diff_report`: Review diagnostics
 * - `rewrite`: Optional dialect rewrite pre-pass
 * - `providers`: Rewrite provider implementations:
 *   - `providers::deepseek`: DeepSeek (OpenAI-compatible) API client
 *   - `providers::mock`: Test double
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod diff_report;
pub mod errors;
pub mod file_utils;
pub mod formatter;
pub mod providers;
pub mod rewrite;
pub mod script_normalizer;
pub mod simplifier;
pub mod subtitle_codec;

// Re-export main types for easier usage
pub use alignment::{AlignmentOutcome, OverflowPolicy, align};
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, RewriteError, ScriptError, SubtitleError};
pub use formatter::{LineWrapStyle, WrapOptions};
pub use script_normalizer::ScriptSentence;
pub use simplifier::Simplifier;
pub use subtitle_codec::{SubtitleEntry, format_srt, parse_srt};
