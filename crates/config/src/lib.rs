//! Configuration loading, validation, and management for AuditFlow.
//!
//! Loads configuration from `~/.auditflow/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use auditflow_core::analysis::{self, AnalysisConfig, Language};
use auditflow_core::conversation::CapacityPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.auditflow/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Selected model id
    #[serde(default = "default_model")]
    pub model: String,

    /// Output language for generated content
    #[serde(default)]
    pub language: Language,

    /// Output token cap for deep summaries
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Character budgets for assembled context
    #[serde(default)]
    pub budgets: BudgetConfig,

    /// Chat history retention
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// HTTP provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_model() -> String {
    analysis::DEFAULT_MODEL.into()
}
fn default_max_output_tokens() -> u32 {
    8192
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("language", &self.language)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("budgets", &self.budgets)
            .field("conversation", &self.conversation)
            .field("provider", &self.provider)
            .finish()
    }
}

/// Character budgets. Truncation is a hard cut at these lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Context budget for deep summary generation
    #[serde(default = "default_summary_chars")]
    pub summary_chars: usize,

    /// Context budget resent on every chat call
    #[serde(default = "default_chat_chars")]
    pub chat_chars: usize,

    /// How much extracted text a document preview shows
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_summary_chars() -> usize {
    100_000
}
fn default_chat_chars() -> usize {
    50_000
}
fn default_preview_chars() -> usize {
    5_000
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            summary_chars: default_summary_chars(),
            chat_chars: default_chat_chars(),
            preview_chars: default_preview_chars(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Maximum retained turns per chat log. 0 keeps everything.
    #[serde(default)]
    pub max_turns: usize,
}

impl ConversationConfig {
    pub fn capacity_policy(&self) -> CapacityPolicy {
        CapacityPolicy::from_max_turns(self.max_turns)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.auditflow/config.toml).
    ///
    /// Also checks environment variables:
    /// - `AUDITFLOW_API_KEY`, `GEMINI_API_KEY`, `API_KEY` fill a missing key
    /// - `AUDITFLOW_MODEL` overrides the model
    /// - `AUDITFLOW_LANGUAGE` overrides the language ("en" or "zh-TW")
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through a lookup function.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if self.api_key.is_none() {
            self.api_key = lookup("AUDITFLOW_API_KEY")
                .or_else(|| lookup("GEMINI_API_KEY"))
                .or_else(|| lookup("API_KEY"))
                .filter(|k| !k.trim().is_empty());
        }

        if let Some(model) = lookup("AUDITFLOW_MODEL") {
            self.model = model;
        }

        if let Some(code) = lookup("AUDITFLOW_LANGUAGE") {
            self.language = Language::from_code(&code).ok_or_else(|| {
                ConfigError::ValidationError(format!("unknown language code '{code}'"))
            })?;
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".auditflow")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.model.trim().is_empty() && !analysis::is_supported_model(&self.model) {
            return Err(ConfigError::ValidationError(format!(
                "model '{}' is not one of the supported models",
                self.model
            )));
        }

        if self.budgets.summary_chars == 0 || self.budgets.chat_chars == 0 {
            return Err(ConfigError::ValidationError(
                "context budgets must be greater than 0".into(),
            ));
        }

        if self.max_output_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_output_tokens must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// The model/language pair handed to the prompt builder.
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig::new(self.model.clone(), self.language)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            language: Language::English,
            max_output_tokens: default_max_output_tokens(),
            budgets: BudgetConfig::default(),
            conversation: ConversationConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
