//! Configuration management for the export tool.

use lotorder_engine::NormalizationPolicy;
use std::env;
use std::path::PathBuf;

/// Export configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Export request JSON (canonical list + lots)
    pub input: PathBuf,
    /// Directory the artifacts are written to
    pub output_dir: PathBuf,
    /// File name stem shared by both artifacts
    pub output_stem: String,
    /// Report title; overrides the request's title
    pub title: Option<String>,
    /// Optional letterhead text printed above the report
    pub letterhead: Option<PathBuf>,
    /// Normalization policy; overrides the request's options
    pub normalization: Option<NormalizationPolicy>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let input = non_empty("ROSTER_INPUT")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingInput)?;

        let output_dir = non_empty("ROSTER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let output_stem = non_empty("ROSTER_OUTPUT_STEM").unwrap_or_else(|| "roster".to_string());

        let title = non_empty("ROSTER_TITLE");

        let letterhead = non_empty("ROSTER_LETTERHEAD").map(PathBuf::from);

        let normalization = non_empty("ROSTER_NORMALIZATION")
            .map(|v| {
                v.parse::<NormalizationPolicy>()
                    .map_err(|_| ConfigError::InvalidNormalization(v))
            })
            .transpose()?;

        Ok(Self {
            input,
            output_dir,
            output_stem,
            title,
            letterhead,
            normalization,
        })
    }

    /// Path of the printable report.
    pub fn table_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.txt", self.output_stem))
    }

    /// Path of the spreadsheet.
    pub fn spreadsheet_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.xlsx", self.output_stem))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ROSTER_INPUT environment variable is required")]
    MissingInput,

    #[error("Invalid ROSTER_NORMALIZATION value: {0}")]
    InvalidNormalization(String),
}
