//! Model types - request and error types

use serde_json::Value;
use thiserror::Error;

use crate::domain::{InlineImage, TurnRole};

/// Guidance included in every missing-credentials failure.
pub const MISSING_CREDENTIALS_GUIDANCE: &str =
    "Please set GEMINI_API_KEY, GOOGLE_API_KEY, or GENKIT_API_KEY in the environment.";

/// One structured round trip: a rendered instruction, an optional inline
/// image, and the schema the model output must satisfy.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub instruction: String,
    pub media: Option<InlineImage>,
    pub response_schema: Value,
}

/// Free-form generation: a system instruction plus role-tagged turns.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system: String,
    pub turns: Vec<ModelTurn>,
}

/// One wire-level turn. Parts are sent in order; a turn may mix text and
/// image parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTurn {
    pub role: TurnRole,
    pub parts: Vec<TurnPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPart {
    Text(String),
    Image(InlineImage),
}

impl ModelTurn {
    pub fn text(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![TurnPart::Text(content.into())],
        }
    }
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing Gemini credentials; {guidance}")]
    MissingCredentials { guidance: &'static str },
    #[error("network error calling the model service: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },
    #[error("model service returned an invalid response: {reason}")]
    InvalidResponse { reason: String },
}

impl ModelError {
    pub fn missing_credentials() -> Self {
        Self::MissingCredentials {
            guidance: MISSING_CREDENTIALS_GUIDANCE,
        }
    }

    pub fn network(source: reqwest::Error) -> Self {
        Self::Network { source }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}
