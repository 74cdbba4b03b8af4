use std::path::Path;

use serde::Deserialize;

use super::error::ConfigError;
use super::loader;
use crate::constants::{DEFAULT_API_PATH, DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Connection settings for the generative model service.
///
/// # Example
///
/// ```toml
/// model = "gemini-2.5-flash"
/// endpoint = "https://generativelanguage.googleapis.com"
/// api_path = "v1beta/models"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model identifier used in API calls (e.g., "gemini-2.5-flash")
    pub model: String,
    /// API endpoint URL
    pub endpoint: String,
    /// API path between the endpoint and the model id
    pub api_path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
        }
    }
}

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub api_path: Option<String>,
}

impl From<RawConfig> for ModelConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = ModelConfig::default();
        Self {
            model: raw.model.unwrap_or(defaults.model),
            endpoint: raw.endpoint.unwrap_or(defaults.endpoint),
            api_path: raw.api_path.unwrap_or(defaults.api_path),
        }
    }
}

impl ModelConfig {
    /// Load configuration, falling back to built-in defaults when no file
    /// exists at the default path. An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        loader::load_config(path)
    }

    pub(super) fn validate(self) -> Result<Self, ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "model" });
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "endpoint" });
        }
        if self.api_path.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "api_path" });
        }
        Ok(self)
    }
}
