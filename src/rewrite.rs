/*!
 * Optional rewrite pre-pass.
 *
 * Runs the full subtitle text through an injected rewrite provider before
 * alignment and validates that the rewritten text still parses into the same
 * number of entries. A full-pass rewrite is attempted first for small tracks;
 * larger tracks, or full passes whose output breaks the structure, fall back
 * to chunked rewriting with per-chunk validation. Malformed or partial
 * rewritten output is never handed to the alignment engine.
 */

use log::{debug, info, warn};

use crate::app_config::RewriteConfig;
use crate::errors::RewriteError;
use crate::providers::RewriteProvider;
use crate::subtitle_codec::{SubtitleEntry, format_srt, parse_srt};

/// Rewrite pre-pass over a parsed subtitle track
pub struct RewritePass<P: RewriteProvider> {
    provider: P,
    config: RewriteConfig,
}

impl<P: RewriteProvider> RewritePass<P> {
    /// Create a rewrite pass with the given provider and settings
    pub fn new(provider: P, config: RewriteConfig) -> Self {
        RewritePass { provider, config }
    }

    /// Rewrite the track and return replacement SRT text.
    ///
    /// The result is guaranteed to parse into the same number of entries as
    /// the input; any structural defect in the provider output is surfaced as
    /// a [`RewriteError`] before alignment can run.
    pub async fn run(&self, entries: &[SubtitleEntry]) -> Result<String, RewriteError> {
        if entries.is_empty() {
            return Ok(String::new());
        }

        if entries.len() <= self.config.full_pass_threshold {
            let full_text = format_srt(entries);
            let rewritten = self.provider.rewrite(&full_text, &self.config.target_dialect).await?;
            if rewritten.trim().is_empty() {
                return Err(RewriteError::EmptyResponse);
            }
            match parse_srt(&rewritten) {
                Ok(parsed) if parsed.len() == entries.len() => {
                    info!("Rewrite full pass kept all {} entries", entries.len());
                    return Ok(rewritten);
                }
                Ok(parsed) => {
                    warn!(
                        "Rewrite full pass returned {} entries instead of {}, falling back to chunks",
                        parsed.len(),
                        entries.len()
                    );
                }
                Err(e) => {
                    warn!("Rewrite full pass output did not parse ({}), falling back to chunks", e);
                }
            }
        }

        self.run_chunked(entries).await
    }

    /// Rewrite in fixed-size chunks, validating each chunk's structure
    async fn run_chunked(&self, entries: &[SubtitleEntry]) -> Result<String, RewriteError> {
        let chunk_size = self.config.chunk_size.max(1);
        let total_chunks = entries.len().div_ceil(chunk_size);
        let mut blocks: Vec<String> = Vec::with_capacity(total_chunks);

        for (chunk_no, chunk) in entries.chunks(chunk_size).enumerate() {
            debug!("Rewriting chunk {}/{} ({} entries)", chunk_no + 1, total_chunks, chunk.len());

            let chunk_text = format_srt(chunk);
            let rewritten = self.provider.rewrite(&chunk_text, &self.config.target_dialect).await?;
            if rewritten.trim().is_empty() {
                return Err(RewriteError::EmptyResponse);
            }

            let parsed = parse_srt(&rewritten).map_err(|_| RewriteError::StructureMismatch {
                expected: chunk.len(),
                actual: 0,
            })?;
            if parsed.len() != chunk.len() {
                return Err(RewriteError::StructureMismatch {
                    expected: chunk.len(),
                    actual: parsed.len(),
                });
            }

            blocks.push(rewritten.trim().to_string());
        }

        Ok(format!("{}\n", blocks.join("\n\n")))
    }
}
