//! Configuration loading and validation
//!
//! The crate runs with built-in defaults; an optional TOML file
//! (`config/dermalens.toml`) can override the model id, endpoint, and API
//! path. Credentials never live in the file; they are resolved from the
//! recognized environment variables (see `constants::CREDENTIAL_ENV_VARS`).

mod error;
mod loader;
mod model;

pub use error::ConfigError;
pub use loader::ensure_env_loaded;
pub use model::ModelConfig;
