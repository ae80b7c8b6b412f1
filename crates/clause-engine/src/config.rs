//! Engine configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) yields a working configuration.
//!
//! ```toml
//! [segmenter]
//! target_tokens = 1000
//!
//! [scheduler]
//! max_requests_per_window = 12
//! window_secs = 60
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub comparison: ComparisonConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or a value is out of range.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segmenter.target_tokens == 0 {
            return Err(ConfigError::Invalid(
                "segmenter.target_tokens must be greater than zero".to_string(),
            ));
        }
        if self.segmenter.clauses_per_page == 0 {
            return Err(ConfigError::Invalid(
                "segmenter.clauses_per_page must be greater than zero".to_string(),
            ));
        }
        if self.scheduler.max_requests_per_window == 0 {
            return Err(ConfigError::Invalid(
                "scheduler.max_requests_per_window must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Approximate token ceiling per clause (default: 1000)
    #[serde(default = "default_target_tokens")]
    pub target_tokens: usize,
    /// Clauses assumed per page when inferring page numbers (default: 5)
    #[serde(default = "default_clauses_per_page")]
    pub clauses_per_page: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            target_tokens: default_target_tokens(),
            clauses_per_page: default_clauses_per_page(),
        }
    }
}

fn default_target_tokens() -> usize {
    1000
}

fn default_clauses_per_page() -> usize {
    5
}

/// Pacing and retry policy for external reasoner calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum external calls in any rolling window (default: 12)
    #[serde(default = "default_max_requests")]
    pub max_requests_per_window: u32,
    /// Length of the rolling window in seconds (default: 60)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Minimum gap between two consecutive calls (default: 500ms)
    #[serde(default = "default_min_spacing_ms")]
    pub min_spacing_ms: u64,
    /// Retries after a transient failure (default: 3)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff delay; doubles on each retry (default: 1000ms)
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
}

impl SchedulerConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn min_spacing(&self) -> Duration {
        Duration::from_millis(self.min_spacing_ms)
    }

    /// Backoff before retry number `attempt` (0-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_backoff_ms.saturating_mul(factor))
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_requests_per_window: default_max_requests(),
            window_secs: default_window_secs(),
            min_spacing_ms: default_min_spacing_ms(),
            max_retries: default_max_retries(),
            base_backoff_ms: default_base_backoff_ms(),
        }
    }
}

fn default_max_requests() -> u32 {
    12
}

fn default_window_secs() -> u64 {
    60
}

fn default_min_spacing_ms() -> u64 {
    500
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_backoff_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Character budget for the clause excerpt sent to the reasoner (default: 4000)
    #[serde(default = "default_excerpt_char_budget")]
    pub excerpt_char_budget: usize,
    /// Upper bound on key findings kept from a reasoner response (default: 5)
    #[serde(default = "default_max_findings")]
    pub max_findings: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            excerpt_char_budget: default_excerpt_char_budget(),
            max_findings: default_max_findings(),
        }
    }
}

fn default_excerpt_char_budget() -> usize {
    4000
}

fn default_max_findings() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Accept bare digit runs as rent/deposit amounts when no currency marker is present
    #[serde(default = "default_permissive_amount_fallback")]
    pub permissive_amount_fallback: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            permissive_amount_fallback: default_permissive_amount_fallback(),
        }
    }
}

fn default_permissive_amount_fallback() -> bool {
    true
}
