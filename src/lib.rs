//! NBA player salary preprocessing
//!
//! A four-stage transform pipeline that turns raw NBA2k player records into
//! a model-ready feature matrix and salary target vector.

pub mod data;
pub mod pipeline;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default threshold above which a pair of features counts as collinear
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.5;

/// Default maximum distinct-value count for a column to survive
/// cardinality pruning
pub const DEFAULT_MAX_CARDINALITY: usize = 50;

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HoopsError {
    #[error("Malformed date in column '{column}': '{value}'")]
    MalformedDate { column: String, value: String },

    #[error("Malformed field in column '{column}': '{value}'")]
    MalformedField { column: String, value: String },

    #[error("Column '{0}' has zero variance and cannot be standardized")]
    DegenerateColumn(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, HoopsError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Absolute pairwise correlation above which one of two features
    /// is dropped
    pub correlation_threshold: f64,
    /// Columns with more distinct values than this are dropped during
    /// feature engineering (`bmi` and `salary` are always retained)
    pub max_cardinality: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pipeline: PipelineConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
            max_cardinality: DEFAULT_MAX_CARDINALITY,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            csv_path: "data/nba2k-full.csv".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HoopsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| HoopsError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HoopsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_named_constants() {
        let config = Config::default();
        assert_eq!(
            config.pipeline.correlation_threshold,
            DEFAULT_CORRELATION_THRESHOLD
        );
        assert_eq!(config.pipeline.max_cardinality, DEFAULT_MAX_CARDINALITY);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(
            parsed.pipeline.correlation_threshold,
            config.pipeline.correlation_threshold
        );
        assert_eq!(parsed.data.csv_path, config.data.csv_path);
    }
}
