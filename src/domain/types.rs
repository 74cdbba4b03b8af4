use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "user" => Some(TurnRole::User),
            "model" => Some(TurnRole::Model),
            _ => None,
        }
    }
}

/// One message in a follow-up chat exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Model, content)
    }
}

/// An image carried inline with a request, parsed from a self-describing
/// data URL (`data:image/<format>;base64,<payload>`).
///
/// The payload stays base64-encoded; parsing only verifies it decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image is not a data URL")]
    NotADataUrl,
    #[error("data URL is missing the ';base64,' marker")]
    MissingBase64Marker,
    #[error("media type '{mime_type}' is not an image")]
    NotAnImage { mime_type: String },
    #[error("image payload is empty")]
    EmptyPayload,
    #[error("image payload is not valid base64: {source}")]
    InvalidBase64 {
        #[from]
        source: base64::DecodeError,
    },
}

impl InlineImage {
    /// Parse a data URL into its media type and base64 payload.
    pub fn from_data_url(value: &str) -> Result<Self, ImageError> {
        let rest = value.trim().strip_prefix("data:").ok_or(ImageError::NotADataUrl)?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or(ImageError::MissingBase64Marker)?;
        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(ImageError::NotAnImage {
                mime_type: mime_type.to_string(),
            });
        }
        if payload.is_empty() {
            return Err(ImageError::EmptyPayload);
        }
        STANDARD.decode(payload)?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_data_url() {
        let image = InlineImage::from_data_url("data:image/jpeg;base64,aGVsbG8=")
            .expect("valid data URL");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "aGVsbG8=");
    }

    #[test]
    fn rejects_plain_base64_without_prefix() {
        assert!(matches!(
            InlineImage::from_data_url("aGVsbG8="),
            Err(ImageError::NotADataUrl)
        ));
    }

    #[test]
    fn rejects_non_image_media_types() {
        assert!(matches!(
            InlineImage::from_data_url("data:text/plain;base64,aGVsbG8="),
            Err(ImageError::NotAnImage { .. })
        ));
    }

    #[test]
    fn rejects_an_empty_payload() {
        assert!(matches!(
            InlineImage::from_data_url("data:image/png;base64,"),
            Err(ImageError::EmptyPayload)
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            InlineImage::from_data_url("data:image/png;base64,???"),
            Err(ImageError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn roles_round_trip_through_strings() {
        assert_eq!(TurnRole::from_str("user"), Some(TurnRole::User));
        assert_eq!(TurnRole::from_str("model"), Some(TurnRole::Model));
        assert_eq!(TurnRole::from_str("assistant"), None);
        assert_eq!(TurnRole::Model.as_str(), "model");
    }
}
