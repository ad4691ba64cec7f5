//! Configuration management for the hotel sentiment analyzer

use crate::error::{Result, SentimentError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Location of the three classifier artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Resolved against the working directory when relative
    pub artifacts_dir: PathBuf,
    pub vectorizer_file: String,
    pub model_file: String,
    pub label_encoder_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Minimum whitespace-separated words before a review is classified
    pub min_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub celebrate_positive: bool,
    pub show_confidence: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Html,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("."),
            vectorizer_file: "tfidf_vectorizer.json".to_string(),
            model_file: "logistic_model.json".to_string(),
            label_encoder_file: "label_encoder.json".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: ModelConfig::default(),
            input: InputConfig { min_tokens: 3 },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                celebrate_positive: true,
                show_confidence: true,
            },
        }
    }
}

impl ModelConfig {
    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.vectorizer_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.model_file)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.label_encoder_file)
    }
}

impl Config {
    /// Load from an explicit path, or from the default location.
    ///
    /// The default location is created with default values on first use; an
    /// explicit path must already exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(SentimentError::Configuration(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SentimentError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SentimentError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("hotel-sentiment")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.input.min_tokens == 0 {
            return Err(SentimentError::Configuration(
                "input.min_tokens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
