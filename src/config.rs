//! Board Configuration Module
//! Source URL, bed range and category mappings, loaded from TOML.

use crate::stats::{BedRange, SpecialtyCategory, TriageCategory, TriageRule};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "BED_BOARD_CONFIG";
/// Config file looked up in the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "bed_board.toml";

/// Widest bed range accepted; the free list walks every bed in it.
pub const MAX_BED_SPAN: usize = 10_000;

const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRhMC2GYC8sSB7fc_rs-esiotsbnWzU8Qq0BXIP4xzDeHoP5FoR3I5PCPiWq8rY8_jMDt3iKJaPmitC/pub?gid=276720072&single=true&output=csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Invalid bed range: {low} > {high}")]
    InvalidRange { low: i64, high: i64 },
    #[error("Bed range {low}-{high} spans more than {max} beds")]
    RangeTooWide { low: i64, high: i64, max: usize },
}

/// Everything the board treats as external input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub source_url: String,
    pub bed_range: BedRange,
    pub cache_ttl_secs: u64,
    pub doctor_scale_headroom: usize,
    pub specialties: Vec<SpecialtyCategory>,
    pub triage: Vec<TriageRule>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            bed_range: BedRange::new(621, 642),
            cache_ttl_secs: 60,
            doctor_scale_headroom: 2,
            specialties: vec![
                SpecialtyCategory {
                    label: "Hematología (HEM)".to_string(),
                    pattern: "HEM".to_string(),
                },
                SpecialtyCategory {
                    label: "Oncología (ONC)".to_string(),
                    pattern: "ONC".to_string(),
                },
            ],
            triage: vec![
                TriageRule {
                    pattern: "VERDE".to_string(),
                    category: TriageCategory::Green,
                },
                TriageRule {
                    pattern: "ROJO".to_string(),
                    category: TriageCategory::Red,
                },
                TriageRule {
                    pattern: "AMARILLO".to_string(),
                    category: TriageCategory::Yellow,
                },
            ],
        }
    }
}

impl BoardConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load from `$BED_BOARD_CONFIG`, else `bed_board.toml`; defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let BedRange { low, high } = self.bed_range;
        if low > high {
            return Err(ConfigError::InvalidRange { low, high });
        }
        if self.bed_range.capacity() > MAX_BED_SPAN {
            return Err(ConfigError::RangeTooWide {
                low,
                high,
                max: MAX_BED_SPAN,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = BoardConfig::from_toml_str("").expect("Should parse");
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.bed_range.capacity(), 22);
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_override() {
        let config = BoardConfig::from_toml_str(
            r#"
            source_url = "http://localhost/ward.csv"
            cache_ttl_secs = 5

            [bed_range]
            low = 1
            high = 3

            [[specialties]]
            label = "Cardiología"
            pattern = "CARD"

            [[triage]]
            pattern = "ROJO"
            category = "red"
            "#,
        )
        .expect("Should parse");

        assert_eq!(config.source_url, "http://localhost/ward.csv");
        assert_eq!(config.bed_range, BedRange::new(1, 3));
        assert_eq!(config.cache_ttl_secs, 5);
        assert_eq!(config.doctor_scale_headroom, 2);
        assert_eq!(config.specialties.len(), 1);
        assert_eq!(config.triage[0].category, TriageCategory::Red);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = BoardConfig::from_toml_str("[bed_range]\nlow = 10\nhigh = 1\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRange { low: 10, high: 1 })
        ));
    }

    #[test]
    fn test_oversized_range_rejected() {
        let extreme = format!("[bed_range]\nlow = {}\nhigh = {}\n", i64::MIN, i64::MAX);
        assert!(matches!(
            BoardConfig::from_toml_str(&extreme),
            Err(ConfigError::RangeTooWide { .. })
        ));

        let wide = format!("[bed_range]\nlow = 1\nhigh = {}\n", MAX_BED_SPAN + 1);
        assert!(matches!(
            BoardConfig::from_toml_str(&wide),
            Err(ConfigError::RangeTooWide { .. })
        ));

        let widest = format!("[bed_range]\nlow = 1\nhigh = {}\n", MAX_BED_SPAN);
        assert!(BoardConfig::from_toml_str(&widest).is_ok());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result =
            BoardConfig::from_toml_str("[[triage]]\npattern = \"AZUL\"\ncategory = \"blue\"\n");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }
}
