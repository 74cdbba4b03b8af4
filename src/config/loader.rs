use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;

use dotenvy::from_filename;
use tracing::debug;

use super::error::ConfigError;
use super::model::{ModelConfig, RawConfig};
use crate::constants::{CONFIG_PATH, ENV_PATH};

static ENV_LOADER: Once = Once::new();

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
pub(super) fn load_config(path: Option<&Path>) -> Result<ModelConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(explicit) => read_config(explicit),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)
            } else {
                debug!("No configuration file found, using built-in defaults");
                Ok(ModelConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<ModelConfig, ConfigError> {
    debug!(path = %path.display(), "Reading model configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    ModelConfig::from(parsed).validate()
}
