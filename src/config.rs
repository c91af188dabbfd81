//! Analysis configuration
//!
//! Settings are read from TOML. The built-in defaults live in
//! `roi_defaults.toml` and are parsed once on first use.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use lazy_static::lazy_static;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::errors::{RoiError, RoiResult};
use crate::grid::{GridConvention, DEFAULT_CONVENTION};
use crate::stats::StatKind;

lazy_static! {
    // Parse the embedded defaults at first use
    static ref DEFAULT_CONFIG: AnalysisConfig = {
        let content = include_str!("../roi_defaults.toml");
        AnalysisConfig::from_toml_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse built-in analysis defaults: {}", e);
            AnalysisConfig::builtin()
        })
    };
}

/// Settings for ROI analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Voxel-center convention applied to loaded images
    #[serde(default = "default_convention")]
    pub convention: GridConvention,
    /// Statistics to report, in order
    #[serde(default = "default_statistics")]
    pub statistics: Vec<StatKind>,
    /// Console log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Write log records to this file instead of the console
    #[serde(default)]
    pub log_file: Option<String>,
    /// Show a progress bar for batch analysis
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_convention() -> GridConvention {
    DEFAULT_CONVENTION
}

fn default_statistics() -> Vec<StatKind> {
    StatKind::ALL.to_vec()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_show_progress() -> bool {
    true
}

impl AnalysisConfig {
    /// Hard-coded fallback, identical to the shipped defaults file
    fn builtin() -> Self {
        AnalysisConfig {
            convention: default_convention(),
            statistics: default_statistics(),
            log_level: default_log_level(),
            log_file: None,
            show_progress: default_show_progress(),
        }
    }

    /// Parse a configuration from TOML text; missing keys take defaults
    pub fn from_toml_str(content: &str) -> RoiResult<Self> {
        let config: AnalysisConfig = toml::from_str(content)
            .map_err(|e| RoiError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> RoiResult<Self> {
        let path = path.as_ref();
        info!("Loading analysis configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize the configuration as TOML
    pub fn to_toml_string(&self) -> RoiResult<String> {
        toml::to_string(self).map_err(|e| RoiError::ConfigError(e.to_string()))
    }

    /// Parsed console log level
    pub fn level_filter(&self) -> RoiResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| RoiError::ConfigError(format!("unknown log level \"{}\"", self.log_level)))
    }

    fn validate(&self) -> RoiResult<()> {
        if self.statistics.is_empty() {
            return Err(RoiError::ConfigError("at least one statistic must be requested".to_string()));
        }
        self.level_filter()?;
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config = AnalysisConfig::default();
        assert_eq!(config, AnalysisConfig::builtin());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_override() {
        let config = AnalysisConfig::from_toml_str(
            "convention = \"corner\"\nstatistics = [\"mean\", \"stddev\"]\n",
        )
        .unwrap();
        assert_eq!(config.convention, GridConvention::Corner);
        assert_eq!(config.statistics, vec![StatKind::Mean, StatKind::Std]);
        assert_eq!(config.log_level, "info");
        assert!(config.show_progress);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        assert!(AnalysisConfig::from_toml_str("statistics = []").is_err());
        assert!(AnalysisConfig::from_toml_str("statistics = [\"mode\"]").is_err());
        assert!(AnalysisConfig::from_toml_str("log_level = \"loud\"").is_err());
        assert!(AnalysisConfig::from_toml_str("convention = \"diagonal\"").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AnalysisConfig::default();
        config.log_file = Some("roikit.log".to_string());
        let text = config.to_toml_string().unwrap();
        assert_eq!(AnalysisConfig::from_toml_str(&text).unwrap(), config);
    }
}
