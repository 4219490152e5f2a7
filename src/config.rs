use crate::error::AnalyzerError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_CLOSE_HOUR: u32 = 16;
pub const DEFAULT_NULL_MARKER: &str = "null";
pub const DEFAULT_DELIMITER: char = ',';

// YAML-serializable configuration structure, every key optional
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ConfigYaml {
    pub close_hour: Option<u32>,
    pub null_marker: Option<String>,
    pub delimiter: Option<char>,
    pub all_or_nothing: Option<bool>,
}

// Loader settings shared by every load call of an analyzer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Local wall-clock hour used as the timestamp of each trading day
    pub close_hour: u32,
    /// Rows with any field equal to this (ignoring case) are skipped
    pub null_marker: String,
    pub delimiter: char,
    /// Roll back rows of a failed load instead of keeping them
    pub all_or_nothing: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            close_hour: DEFAULT_CLOSE_HOUR,
            null_marker: DEFAULT_NULL_MARKER.to_string(),
            delimiter: DEFAULT_DELIMITER,
            all_or_nothing: false,
        }
    }
}

impl AnalyzerConfig {
    // Load configuration from YAML file or environment variables
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        if let Ok(config_file) = env::var("CONFIG_FILE") {
            Self::from_yaml(&config_file)
        } else {
            Ok(Self::from_env())
        }
    }

    pub fn from_yaml(file_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_path = file_path.as_ref();
        let yaml_content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read config file {}", file_path.display()))?;

        let yaml_config: ConfigYaml = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse YAML config {}", file_path.display()))?;

        let defaults = Self::default();
        let config = Self {
            close_hour: yaml_config.close_hour.unwrap_or(defaults.close_hour),
            null_marker: yaml_config.null_marker.unwrap_or(defaults.null_marker),
            delimiter: yaml_config.delimiter.unwrap_or(defaults.delimiter),
            all_or_nothing: yaml_config.all_or_nothing.unwrap_or(defaults.all_or_nothing),
        };
        config.validate()?;
        Ok(config)
    }

    // Unset or unparsable variables fall back to the defaults
    pub fn from_env() -> Self {
        let close_hour = env::var("STOCK_CLOSE_HOUR")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|hour| *hour < 24)
            .unwrap_or(DEFAULT_CLOSE_HOUR);

        let null_marker = env::var("STOCK_NULL_MARKER")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_NULL_MARKER.to_string());

        let delimiter = env::var("STOCK_DELIMITER")
            .ok()
            .and_then(|s| single_ascii_char(&s))
            .filter(|c| *c != '\n' && *c != '\r')
            .unwrap_or(DEFAULT_DELIMITER);

        let all_or_nothing = env::var("STOCK_ALL_OR_NOTHING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);

        Self {
            close_hour,
            null_marker,
            delimiter,
            all_or_nothing,
        }
    }

    /// Reject settings the loader cannot honour
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.close_hour > 23 {
            return Err(AnalyzerError::InvalidConfig(format!(
                "close_hour must be between 0 and 23, got {}",
                self.close_hour
            )));
        }
        if self.delimiter_byte().is_none() {
            return Err(AnalyzerError::InvalidConfig(format!(
                "delimiter must be a single ASCII character other than a line break, got {:?}",
                self.delimiter
            )));
        }
        if self.null_marker.is_empty() {
            return Err(AnalyzerError::InvalidConfig(
                "null_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects, `None` if it cannot be one
    pub fn delimiter_byte(&self) -> Option<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii() && *b != b'\n' && *b != b'\r')
    }
}

fn single_ascii_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Some(c),
        _ => None,
    }
}
