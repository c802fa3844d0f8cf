/*!
 * Provider implementations for the rewrite pre-pass.
 *
 * This module contains the capability interface for external text-rewriting
 * services and its implementations:
 * - DeepSeek: OpenAI-compatible chat API client
 * - Mock: configurable test double
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::RewriteError;

/// Common trait for rewrite providers.
///
/// A provider receives the full subtitle text and a target-dialect instruction
/// and returns a full replacement subtitle text. It is injected at the
/// pipeline boundary and never called from within the alignment core, keeping
/// the core pure and testable without network access.
#[async_trait]
pub trait RewriteProvider: Send + Sync + Debug {
    /// Rewrite subtitle text into the target dialect
    ///
    /// # Arguments
    /// * `subtitle_text` - Full SRT text to rewrite
    /// * `target_dialect` - Instruction naming the dialect to rewrite into
    ///
    /// # Returns
    /// * `Result<String, RewriteError>` - The rewritten SRT text or an error
    async fn rewrite(&self, subtitle_text: &str, target_dialect: &str) -> Result<String, RewriteError>;
}

pub mod deepseek;
pub mod mock;
