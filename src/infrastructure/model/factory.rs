//! Model handle construction - credential resolution and client selection

use std::env;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::gemini::GeminiModel;
use super::stub::OfflineModel;
use super::traits::GenerativeModel;
use crate::config::{ConfigError, ModelConfig, ensure_env_loaded};
use crate::constants::CREDENTIAL_ENV_VARS;

/// Resolve a Gemini credential from the recognized environment variables.
/// Returns the variable name that matched alongside its value.
pub fn resolve_credential() -> Option<(&'static str, String)> {
    for name in CREDENTIAL_ENV_VARS {
        if let Ok(value) = env::var(name) {
            if !value.trim().is_empty() {
                return Some((name, value));
            }
        }
    }
    None
}

/// Process-wide handle to the generative model, constructed once at startup
/// and passed by reference into the flows. Selects the live Gemini client
/// when a credential is configured and the offline stub otherwise.
#[derive(Clone)]
pub struct ModelHandle {
    inner: Arc<dyn GenerativeModel>,
    live: bool,
}

impl ModelHandle {
    /// Build from `config/.env`, the recognized credential variables, and the
    /// optional configuration file at the default path.
    pub fn from_env() -> Result<Self, ConfigError> {
        ensure_env_loaded();
        let config = ModelConfig::load(None)?;
        Ok(Self::from_config(&config))
    }

    /// Build from an explicit configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        ensure_env_loaded();
        let config = ModelConfig::load(Some(path))?;
        Ok(Self::from_config(&config))
    }

    /// Build from already-loaded configuration. Credentials still come from
    /// the environment; they never live in configuration files.
    pub fn from_config(config: &ModelConfig) -> Self {
        match resolve_credential() {
            Some((name, key)) => {
                info!(
                    credential = name,
                    model = config.model.as_str(),
                    "Using live Gemini client"
                );
                Self {
                    inner: Arc::new(GeminiModel::new(config, key)),
                    live: true,
                }
            }
            None => {
                warn!("No Gemini credential found, using offline stub");
                Self::offline()
            }
        }
    }

    /// An explicitly unconfigured handle backed by the offline stub.
    pub fn offline() -> Self {
        Self {
            inner: Arc::new(OfflineModel),
            live: false,
        }
    }

    /// Wrap an arbitrary client. Used to inject fakes in tests.
    pub fn from_client(client: impl GenerativeModel + 'static) -> Self {
        Self {
            inner: Arc::new(client),
            live: true,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn client(&self) -> &dyn GenerativeModel {
        self.inner.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_handle_reports_not_live() {
        let handle = ModelHandle::offline();
        assert!(!handle.is_live());
    }

    #[test]
    fn injected_client_reports_live() {
        let handle = ModelHandle::from_client(OfflineModel);
        assert!(handle.is_live());
    }
}
