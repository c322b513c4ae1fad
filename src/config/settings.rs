//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Browser-like user agent; many sites reject default or bot agents.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Content extraction settings
    #[serde(default)]
    pub content: ContentSettings,

    /// History settings
    #[serde(default)]
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for the summary database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// User identifier summaries are stored under
    #[serde(default = "default_user")]
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (for local/custom providers)
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSettings {
    /// User agent sent when fetching articles and video pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum trimmed length of raw text input
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,

    /// Below this length the best article container is ignored in favour of the page body
    #[serde(default = "default_body_fallback_chars")]
    pub body_fallback_chars: usize,

    /// Minimum length of extracted article text
    #[serde(default = "default_min_article_chars")]
    pub min_article_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum number of summaries returned by history
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "ringkas", "ringkas")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/ringkas"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_user() -> String {
    "local".to_string()
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_min_text_chars() -> usize {
    10
}

fn default_body_fallback_chars() -> usize {
    100
}

fn default_min_article_chars() -> usize {
    50
}

fn default_history_limit() -> usize {
    50
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            user: default_user(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
        }
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            min_text_chars: default_min_text_chars(),
            body_fallback_chars: default_body_fallback_chars(),
            min_article_chars: default_min_article_chars(),
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML text; missing keys fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            let key = ["RINGKAS_GEMINI_API_KEY", "GOOGLE_API_KEY"]
                .iter()
                .filter_map(|name| std::env::var(name).ok())
                .find(|key| !key.trim().is_empty());
            if let Some(key) = key {
                self.llm.api_key = key;
            }
        }

        if let Ok(user) = std::env::var("RINGKAS_USER") {
            if !user.trim().is_empty() {
                self.general.user = user.trim().to_string();
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "ringkas", "ringkas")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the database path
    pub fn database_path(&self) -> PathBuf {
        self.general.data_dir.join("ringkas.db")
    }
}
