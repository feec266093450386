//! Configuration loading, validation, and management for HelpDoc.
//!
//! Loads configuration from `~/.helpdoc/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.helpdoc/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// The reference document and how to export it
    #[serde(default)]
    pub document: DocumentConfig,

    /// Language-model backend used to phrase answers
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Ranking and prompt settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Sync trigger settings
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Google Docs identifier of the reference document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Base URL of the export endpoint
    #[serde(default = "default_export_base_url")]
    pub export_base_url: String,

    /// Per-request timeout for export fetches
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Fetch the document when a question arrives before any sync
    #[serde(default = "default_true")]
    pub fetch_on_miss: bool,
}

fn default_export_base_url() -> String {
    "https://docs.google.com".into()
}
fn default_fetch_timeout() -> u64 {
    30
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            document_id: None,
            export_base_url: default_export_base_url(),
            fetch_timeout_secs: default_fetch_timeout(),
            fetch_on_miss: true,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.anthropic.com".into()
}
fn default_model() -> String {
    "claude-3-5-sonnet-20241022".into()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    500
}
fn default_provider_timeout() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// How many ranked sections go into the prompt
    #[serde(default = "default_max_sections")]
    pub max_sections: usize,

    /// Optional cap on assembled context size, in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_context_chars: Option<usize>,

    /// Replace the built-in system instruction entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_override: Option<String>,
}

fn default_max_sections() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_sections: default_max_sections(),
            max_context_chars: None,
            system_prompt_override: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Origins allowed by CORS. Empty = same-origin only.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: vec![],
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Shared secret the scheduler presents as `Authorization: Bearer <secret>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_secret: Option<String>,
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("cron_secret", &redact(&self.cron_secret))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.helpdoc/config.toml).
    ///
    /// Environment variables take precedence over the file:
    /// - `GOOGLE_DOC_ID`
    /// - `HELPDOC_API_KEY`, then `ANTHROPIC_API_KEY`
    /// - `HELPDOC_MODEL`
    /// - `CRON_SECRET`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
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

    /// Apply environment overrides using `lookup` to read variables.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(doc_id) = lookup("GOOGLE_DOC_ID").filter(|v| !v.trim().is_empty()) {
            self.document.document_id = Some(doc_id);
        }

        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let api_key = non_empty("HELPDOC_API_KEY").or_else(|| non_empty("ANTHROPIC_API_KEY"));
        if let Some(key) = api_key {
            self.provider.api_key = Some(key);
        }

        if let Some(model) = lookup("HELPDOC_MODEL") {
            self.provider.model = model;
        }

        if let Some(secret) = lookup("CRON_SECRET").filter(|v| !v.is_empty()) {
            self.sync.cron_secret = Some(secret);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".helpdoc")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.temperature < 0.0 || self.provider.temperature > 1.0 {
            return Err(ConfigError::ValidationError(
                "provider.temperature must be between 0.0 and 1.0".into(),
            ));
        }

        if self.provider.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "provider.max_tokens must be > 0".into(),
            ));
        }

        if self.retrieval.max_sections == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.max_sections must be > 0".into(),
            ));
        }

        if let Some(id) = &self.document.document_id {
            if id.trim().is_empty() || id.contains('/') {
                return Err(ConfigError::ValidationError(
                    "document.document_id must be a bare document identifier".into(),
                ));
            }
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.provider
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
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
