/*!
 * Application controller.
 *
 * Orchestrates the correction pipeline: read the script and subtitle files,
 * run the optional rewrite pre-pass, parse, normalize, align, re-wrap, and
 * write the corrected SRT plus the optional diff report. The core transforms
 * stay pure; all I/O happens here.
 */

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};

use crate::alignment::{self, AlignmentOutcome};
use crate::app_config::Config;
use crate::diff_report;
use crate::errors::RewriteError;
use crate::file_utils::FileManager;
use crate::formatter::{detect_wrap_style, format_entry};
use crate::providers::deepseek::DeepSeek;
use crate::rewrite::RewritePass;
use crate::script_normalizer;
use crate::simplifier::Simplifier;
use crate::subtitle_codec::{SubtitleEntry, format_srt, parse_srt};

/// Result of one correction pass over a script/subtitle pair
#[derive(Debug)]
pub struct CorrectionResult {
    /// Entries as parsed from the input (after any rewrite pass)
    pub original: Vec<SubtitleEntry>,

    /// Entries with replaced, re-wrapped text
    pub corrected: Vec<SubtitleEntry>,

    /// Alignment details, including unmatched tail and overflow entries
    pub outcome: AlignmentOutcome,
}

/// Main application controller
pub struct Controller {
    config: Config,
    simplifier: Simplifier,
}

impl Controller {
    /// Create a controller from a validated configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let simplifier = if config.variant_table.is_empty() {
            Simplifier::default()
        } else {
            Simplifier::from_string_pairs(&config.variant_table)
        };
        Ok(Controller { config, simplifier })
    }

    /// Run the full correction pipeline over files on disk
    pub async fn run(
        &self,
        script_path: &Path,
        srt_path: &Path,
        output_path: &Path,
        report_path: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<()> {
        if !FileManager::file_exists(script_path) {
            return Err(anyhow!("Script file does not exist: {:?}", script_path));
        }
        if !FileManager::file_exists(srt_path) {
            return Err(anyhow!("Subtitle file does not exist: {:?}", srt_path));
        }
        if output_path.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                output_path
            ));
        }

        let script_text = FileManager::read_to_string(script_path)?;
        let mut subtitle_text = FileManager::read_to_string(srt_path)?;

        if self.config.rewrite.enabled {
            subtitle_text = self.run_rewrite_pass(&subtitle_text).await?;
        }

        let result = self.correct_text(&script_text, &subtitle_text)?;

        let output = format_srt(&result.corrected);
        FileManager::write_to_file(output_path, &output)?;
        info!("Wrote corrected subtitles to {:?}", output_path);

        let report = diff_report::build_report(&result.original, &result.corrected, &result.outcome);
        if let Some(report_path) = report_path {
            FileManager::write_to_file(report_path, &report)?;
            info!("Wrote diff report to {:?}", report_path);
        } else {
            debug!("Diff report:\n{}", report);
        }

        Ok(())
    }

    /// Pure correction pipeline over in-memory text.
    ///
    /// Parses the subtitle text, normalizes the script, aligns and re-wraps.
    /// Safe to call concurrently from independent executions; no state is
    /// shared between invocations.
    pub fn correct_text(&self, script_text: &str, subtitle_text: &str) -> Result<CorrectionResult> {
        let entries = parse_srt(subtitle_text)?;
        let sentences = script_normalizer::prepare(script_text, &self.simplifier)?;
        debug!("Parsed {} entries and {} script sentences", entries.len(), sentences.len());

        let outcome = alignment::align(
            &sentences,
            &entries,
            &self.simplifier,
            self.config.alignment.window_max,
            self.config.alignment.overflow_policy,
        );

        if !outcome.unmatched_tail.is_empty() {
            warn!(
                "{} script sentence(s) were not consumed by any entry (first unmatched index: {})",
                outcome.unmatched_tail.len(),
                outcome.unmatched_tail[0]
            );
        }
        if !outcome.overflow_entries.is_empty() {
            warn!(
                "{} entries were assigned after the script ran out; applied {:?} policy",
                outcome.overflow_entries.len(),
                self.config.alignment.overflow_policy
            );
        }

        let corrected: Vec<SubtitleEntry> = entries
            .iter()
            .zip(outcome.assignments.iter())
            .map(|(entry, assignment)| {
                let style = detect_wrap_style(&entry.text_lines);
                let lines = format_entry(
                    &assignment.text,
                    entry.line_count(),
                    style,
                    self.config.formatting,
                );
                SubtitleEntry::new(entry.index, entry.start.clone(), entry.end.clone(), lines)
            })
            .collect();

        Ok(CorrectionResult {
            original: entries,
            corrected,
            outcome,
        })
    }

    /// Run the rewrite pre-pass over raw subtitle text
    async fn run_rewrite_pass(&self, subtitle_text: &str) -> Result<String> {
        let api_key = self
            .config
            .rewrite
            .resolve_api_key()
            .ok_or(RewriteError::MissingApiKey)?;

        let provider = DeepSeek::new(
            api_key,
            self.config.rewrite.endpoint.clone(),
            self.config.rewrite.model.clone(),
            self.config.rewrite.timeout_secs,
        );
        let pass = RewritePass::new(provider, self.config.rewrite.clone());

        let entries = parse_srt(subtitle_text).context("Subtitle input must parse before rewriting")?;
        info!(
            "Rewriting {} entries into {}",
            entries.len(),
            self.config.rewrite.target_dialect
        );

        let rewritten = pass.run(&entries).await?;
        Ok(rewritten)
    }
}
