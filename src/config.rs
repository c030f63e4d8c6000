// src/config.rs
use crate::constants::{
    DEFAULT_API_URL, DEFAULT_COUNTER_DURATION_MS, DEFAULT_PAGE_SIZE, DEFAULT_QUESTION_COUNT,
    DEFAULT_VISIBILITY_THRESHOLD,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for exoseeker
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QuizConfig {
    /// `embedded`, a file path or an http(s) URL
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CounterConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

// Default value functions
fn default_base_url() -> String { DEFAULT_API_URL.to_string() }
fn default_source() -> String { "embedded".to_string() }
fn default_question_count() -> usize { DEFAULT_QUESTION_COUNT }
fn default_duration_ms() -> u64 { DEFAULT_COUNTER_DURATION_MS }
fn default_threshold() -> f64 { DEFAULT_VISIBILITY_THRESHOLD }
fn default_page_size() -> u32 { DEFAULT_PAGE_SIZE }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            question_count: default_question_count(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            threshold: default_threshold(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// `<config_dir>/exoseeker/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("exoseeker").join("config.toml"))
    }

    /// An explicit path must exist; the default location is optional.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default location");
                Self::load(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_no_file_when_creating_default_then_creates_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config = Config::create_default(&config_path).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.quiz.source, "embedded");
        assert_eq!(config.counter.duration_ms, 2000);
        assert!(config_path.exists());
    }

    #[test]
    fn given_config_when_saving_then_writes_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        Config::default().save(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[api]"));
        assert!(content.contains("[quiz]"));
        assert!(content.contains("[counter]"));
        assert!(content.contains("[search]"));
        assert!(!content.contains("timeout_secs"));
    }

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("load_test.toml");
        let toml_content = r#"
[api]
base_url = "https://exo.example/api"
timeout_secs = 5

[quiz]
source = "https://exo.example/assets/js/quiz.json"
question_count = 5

[counter]
duration_ms = 1000
threshold = 0.5

[search]
page_size = 50
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.api.base_url, "https://exo.example/api");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.quiz.question_count, 5);
        assert_eq!(config.counter.duration(), Duration::from_millis(1000));
        assert_eq!(config.counter.threshold, 0.5);
        assert_eq!(config.search.page_size, 50);
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[quiz]\nquestion_count = 3\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        // Specified value
        assert_eq!(config.quiz.question_count, 3);
        // Default values
        assert_eq!(config.quiz.source, "embedded");
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.counter.threshold, 0.6);
        assert_eq!(config.search.page_size, 20);
    }

    #[test]
    fn given_nonexistent_explicit_path_when_resolving_then_returns_error() {
        let result = Config::resolve(Some(Path::new("/nonexistent/path/config.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn given_round_trip_when_saving_and_loading_then_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("roundtrip.toml");
        let original = Config {
            api: ApiConfig {
                base_url: "https://exo.example/api".to_string(),
                timeout_secs: Some(30),
            },
            search: SearchConfig { page_size: 100 },
            ..Default::default()
        };

        original.save(&config_path).unwrap();
        let loaded = Config::load(&config_path).unwrap();

        assert_eq!(loaded, original);
    }
}
