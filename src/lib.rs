//! DermaLens - skin lesion analysis client for the Google Generative
//! Language API.
//!
//! The crate exposes four request/response contracts - image analysis,
//! personalized care suggestions, medication recommendations, and a
//! follow-up chat grounded in the uploaded image - plus the session state
//! machine that ties them together for a caller. The model service sits
//! behind the [`model::GenerativeModel`] facade; an unconfigured deployment
//! gets a deterministic offline stub instead of the live client.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::flows::{self, FlowError};
pub use application::schema;
pub use application::session::{
    AnalysisStrategy, DiagnosisSession, DiagnosisState, FullImageAnalysis, PresetConditionTriage,
    SessionError,
};
pub use config::{ConfigError, ModelConfig};
pub use domain::types;
pub use infrastructure::model;

use tracing_subscriber::{EnvFilter, fmt};

/// Initialise the tracing subscriber once. Safe to call more than once;
/// later calls are no-ops.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
