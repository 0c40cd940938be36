//! Assessment configuration.
//!
//! The tuple threshold and confidence level are fixed by the estimators
//! and cannot be configured.

use crate::sample::MAX_BITS_PER_SYMBOL;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the sample file is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Symbol width in bits (1-8). Inferred from the data when absent.
    pub bits_per_symbol: Option<u8>,
    /// Maximum number of symbols to read.
    pub max_symbols: Option<usize>,
}

impl SampleConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bits) = self.bits_per_symbol {
            if bits == 0 || bits > MAX_BITS_PER_SYMBOL {
                return Err(ConfigError::InvalidBitWidth(bits));
            }
        }
        if self.max_symbols.is_some_and(|max| max < 2) {
            return Err(ConfigError::InvalidMaxSymbols);
        }
        Ok(())
    }
}

/// Estimator options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Start the LRS search at the t-Tuple stopping length instead of 1.
    pub seed_lrs_from_t_tuple: bool,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            seed_lrs_from_t_tuple: true,
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per estimate.
    #[default]
    Text,
    /// Full report including per-round statistics.
    Toml,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Log intermediate values of both estimators.
    pub verbose: bool,
    /// Report format.
    pub format: OutputFormat,
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("bits per symbol must be 1-8, got {0}")]
    InvalidBitWidth(u8),
    #[error("max symbols must be at least 2")]
    InvalidMaxSymbols,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// `[sample]` section.
    #[serde(default)]
    pub sample: SampleConfig,
    /// `[assessment]` section.
    #[serde(default)]
    pub assessment: AssessmentConfig,
    /// `[output]` section.
    #[serde(default)]
    pub output: OutputConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.sample.validate()?;
        Ok(config)
    }
}
