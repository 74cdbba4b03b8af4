//! Application constants
//!
//! Single source of truth for paths, model defaults, and the credential
//! variable contract.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/dermalens.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Model identifier used when the configuration does not override it
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Google Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_API_PATH: &str = "v1beta/models";

/// Environment variables recognized as Gemini credentials. Any one of them
/// being set selects live mode; the names are an external contract.
pub const CREDENTIAL_ENV_VARS: [&str; 4] = [
    "GEMINI_API_KEY",
    "GOOGLE_API_KEY",
    "GENKIT_API_KEY",
    "NEXT_PUBLIC_GEMINI_API_KEY",
];
