use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::enhance::EnhancementKind;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Which variant occupies the emphasis slot of the action set
    #[serde(default)]
    pub emphasis_variant: EmphasisVariant,

    /// Batch processing config
    #[serde(default)]
    pub batch: BatchConfig,

    /// Cache config
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Occupant of the emphasis slot in the action set.
///
/// `emotion` and `exclamation` are mutually exclusive variants of the same
/// slot, never both available at once.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisVariant {
    // @variant: Wrap in ** markers
    #[default]
    Emotion,
    // @variant: Upper-case and append "!"
    Exclamation,
}

impl EmphasisVariant {
    // @returns: Capitalized variant name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Emotion => "Emotion",
            Self::Exclamation => "Exclamation",
        }
    }

    // @returns: Lowercase variant identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Emotion => "emotion".to_string(),
            Self::Exclamation => "exclamation".to_string(),
        }
    }

    /// The closed set of enhancement kinds this variant makes available
    pub fn active_kinds(&self) -> Vec<EnhancementKind> {
        let emphasis_kind = match self {
            Self::Emotion => EnhancementKind::Emotion,
            Self::Exclamation => EnhancementKind::Exclamation,
        };

        vec![
            EnhancementKind::Pause,
            EnhancementKind::Emphasize,
            emphasis_kind,
            EnhancementKind::Question,
            EnhancementKind::Quote,
        ]
    }
}

// Implement Display trait for EmphasisVariant
impl std::fmt::Display for EmphasisVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for EmphasisVariant
impl std::str::FromStr for EmphasisVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "emotion" => Ok(Self::Emotion),
            "exclamation" => Ok(Self::Exclamation),
            _ => Err(anyhow!("Invalid emphasis variant: {}", s)),
        }
    }
}

/// Batch processing configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    // @field: Extensions treated as text documents inside archives and directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    // @field: Name of the output archive for multi-document batches
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            archive_name: default_archive_name(),
        }
    }
}

/// Enhancement cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    // @field: Whether results are memoized within a run
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

fn default_archive_name() -> String {
    "enhanced_texts.zip".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            emphasis_variant: EmphasisVariant::default(),
            batch: BatchConfig::default(),
            cache: CacheConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| anyhow!("Failed to open config file {:?}: {}", path.as_ref(), e))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.batch.extensions.is_empty() {
            return Err(anyhow!("At least one text extension must be configured"));
        }

        for extension in &self.batch.extensions {
            let trimmed = extension.trim_start_matches('.');
            if trimmed.is_empty() {
                return Err(anyhow!("Empty extension in batch.extensions"));
            }
        }

        if self.batch.archive_name.is_empty() {
            return Err(anyhow!("Output archive name must not be empty"));
        }

        if !self.batch.archive_name.to_lowercase().ends_with(".zip") {
            return Err(anyhow!(
                "Output archive name must end with .zip, got '{}'",
                self.batch.archive_name
            ));
        }

        Ok(())
    }

    /// Whether an enhancement kind is in the configured active set
    pub fn is_kind_active(&self, kind: EnhancementKind) -> bool {
        self.emphasis_variant.active_kinds().contains(&kind)
    }
}
