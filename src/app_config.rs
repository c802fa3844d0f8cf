use std::collections::HashMap;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::alignment::OverflowPolicy;
use crate::formatter::WrapOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Alignment engine tunables
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Line re-wrapping tunables
    #[serde(default)]
    pub formatting: WrapOptions,

    /// Character-variant substitution table for the simplifier. When empty,
    /// the built-in default table is used.
    #[serde(default)]
    pub variant_table: HashMap<String, String>,

    /// Optional rewrite pre-pass settings
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Alignment engine tunables
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlignmentConfig {
    /// Largest number of sentences a single entry may claim
    #[serde(default = "default_window_max")]
    pub window_max: usize,

    /// Fallback when entries outnumber the available sentences
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        AlignmentConfig {
            window_max: default_window_max(),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

/// Rewrite pre-pass (dialect rewrite) settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RewriteConfig {
    /// Whether the rewrite pre-pass runs before alignment
    #[serde(default)]
    pub enabled: bool,

    /// Service URL of the OpenAI-compatible chat endpoint
    #[serde(default = "default_rewrite_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_rewrite_model")]
    pub model: String,

    /// API key; falls back to the DEEPSEEK_API_KEY environment variable
    #[serde(default)]
    pub api_key: String,

    /// Target dialect instruction passed to the provider
    #[serde(default = "default_target_dialect")]
    pub target_dialect: String,

    /// Request timeout in seconds
    #[serde(default = "default_rewrite_timeout_secs")]
    pub timeout_secs: u64,

    /// Entry count above which the subtitle is rewritten in chunks
    #[serde(default = "default_full_pass_threshold")]
    pub full_pass_threshold: usize,

    /// Entries per chunk for the chunked fallback
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            enabled: false,
            endpoint: default_rewrite_endpoint(),
            model: default_rewrite_model(),
            api_key: String::new(),
            target_dialect: default_target_dialect(),
            timeout_secs: default_rewrite_timeout_secs(),
            full_pass_threshold: default_full_pass_threshold(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if self.alignment.window_max == 0 {
            return Err(anyhow!("alignment.window_max must be at least 1"));
        }
        if self.alignment.window_max > 16 {
            return Err(anyhow!(
                "alignment.window_max of {} is unreasonably large (max 16)",
                self.alignment.window_max
            ));
        }
        if self.formatting.line_char_budget == 0 {
            return Err(anyhow!("formatting.line_char_budget must be at least 1"));
        }
        if self.rewrite.enabled {
            if self.rewrite.endpoint.trim().is_empty() {
                return Err(anyhow!("rewrite.endpoint must be set when the rewrite pass is enabled"));
            }
            if self.rewrite.model.trim().is_empty() {
                return Err(anyhow!("rewrite.model must be set when the rewrite pass is enabled"));
            }
            if self.rewrite.chunk_size == 0 {
                return Err(anyhow!("rewrite.chunk_size must be at least 1"));
            }
        }
        Ok(())
    }
}

impl RewriteConfig {
    /// Resolve the API key from config or the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var("DEEPSEEK_API_KEY").ok().filter(|key| !key.trim().is_empty())
    }
}

fn default_window_max() -> usize {
    4
}

fn default_rewrite_endpoint() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_rewrite_model() -> String {
    "deepseek-chat".to_string()
}

fn default_target_dialect() -> String {
    "粤语白话（简体字）".to_string()
}

fn default_rewrite_timeout_secs() -> u64 {
    120
}

fn default_full_pass_threshold() -> usize {
    120
}

fn default_chunk_size() -> usize {
    80
}
