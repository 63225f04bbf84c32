//! Runtime configuration read from the process environment.
//!
//! # Responsibility
//! - Resolve logging and assistant settings from environment variables.
//! - Apply documented defaults when a variable is unset or blank.
//!
//! # Invariants
//! - Loading never fails because a secret is missing; the assistant reports
//!   a missing key on first use instead.
//! - Values are trimmed; blank values count as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Log level override.
pub const ENV_LOG_LEVEL: &str = "DESKFLOW_LOG_LEVEL";
/// Absolute directory for rolling log files; stderr when unset.
pub const ENV_LOG_DIR: &str = "DESKFLOW_LOG_DIR";
/// Primary generative API key variable.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
/// Fallback generative API key variable.
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
/// Generative API endpoint override.
pub const ENV_AI_BASE_URL: &str = "DESKFLOW_AI_BASE_URL";

pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_CAPTION_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gemini-3-pro-preview";

/// Logging bootstrap settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Rolling file directory. `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: non_blank(lookup(ENV_LOG_LEVEL)).unwrap_or(defaults.level),
            log_dir: non_blank(lookup(ENV_LOG_DIR)).map(PathBuf::from),
        }
    }
}

/// Generative API settings.
#[derive(Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Model used for social caption generation.
    pub caption_model: String,
    /// Model used for the general workspace assistant.
    pub assistant_model: String,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("caption_model", &self.caption_model)
            .field("assistant_model", &self.assistant_model)
            .finish()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            caption_model: DEFAULT_CAPTION_MODEL.to_string(),
            assistant_model: DEFAULT_ASSISTANT_MODEL.to_string(),
        }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_key =
            non_blank(lookup(ENV_API_KEY)).or_else(|| non_blank(lookup(ENV_API_KEY_FALLBACK)));
        let base_url = non_blank(lookup(ENV_AI_BASE_URL))
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        Self {
            api_key,
            base_url,
            ..defaults
        }
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
