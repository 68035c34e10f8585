//! Process configuration from the environment
//!
//! `.env` is loaded by `main` before anything here runs.

use std::fmt;
use thiserror::Error;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const PORT_VAR: &str = "GEMINI_CHAT_PORT";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 7860;

/// Errors raised while turning configuration into live clients
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_MODEL is not set; it must name the Gemini model to use")]
    MissingModel,
    #[error("invalid model identifier {0:?} in GEMINI_MODEL")]
    InvalidModel(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for the Gemini client
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    /// The configured model name, rejecting values that cannot be a path
    /// segment of the `generateContent` URL.
    pub fn model_name(&self) -> Result<&str, ConfigError> {
        let model = self.model.as_deref().ok_or(ConfigError::MissingModel)?;
        if model.is_empty() {
            return Err(ConfigError::MissingModel);
        }
        if model.contains('/') || model.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidModel(model.to_string()));
        }
        Ok(model)
    }
}

/// Full process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = get(PORT_VAR)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            gemini: GeminiConfig {
                api_key: get(API_KEY_VAR),
                model: get(MODEL_VAR),
                base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
            port,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}
