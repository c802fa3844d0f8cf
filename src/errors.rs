/*!
 * Error types for the subalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while parsing or serializing subtitle files
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A blank-line-delimited block did not yield index / timecode / text parts
    #[error("Malformed subtitle block {block}: {reason}")]
    MalformedBlock {
        /// One-based position of the offending block
        block: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The input contained no subtitle blocks at all
    #[error("Subtitle input contains no entries")]
    Empty,
}

/// Errors that can occur while normalizing a reference script
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The script yielded zero sentences after normalization
    #[error("Script yielded no sentences after normalization")]
    NoSentences,
}

/// Errors that can occur during the optional rewrite pre-pass
#[derive(Error, Debug)]
pub enum RewriteError {
    /// No API key configured for the rewrite provider
    #[error("Rewrite provider has no API key configured")]
    MissingApiKey,

    /// Error when making a provider request fails
    #[error("Rewrite request failed: {0}")]
    RequestFailed(String),

    /// Provider returned an empty response body
    #[error("Rewrite provider returned an empty response")]
    EmptyResponse,

    /// Rewritten text did not preserve the subtitle structure
    #[error("Rewritten subtitle structure mismatch: expected {expected} entries, got {actual}")]
    StructureMismatch {
        /// Entry count of the original subtitle text
        expected: usize,
        /// Entry count of the rewritten text
        actual: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing or serialization
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from script normalization
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error from the rewrite pre-pass
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
