//! Wire-format adapter - converts requests to Generative Language API JSON

use serde_json::{Value, json};

use super::types::{ModelTurn, StructuredRequest, TurnPart};

/// Adapter for building `contents` payloads
pub struct WireAdapter;

impl WireAdapter {
    /// Build the `contents` array for a one-shot structured request: a single
    /// user entry carrying the instruction text and, when present, the image
    /// as an `inline_data` part.
    pub fn structured_contents(request: &StructuredRequest) -> Vec<Value> {
        let mut parts = vec![json!({"text": request.instruction})];
        if let Some(image) = &request.media {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.data,
                }
            }));
        }
        vec![json!({"role": "user", "parts": parts})]
    }

    /// Build the `contents` array for a chat request, preserving turn order
    /// and the part order within each turn.
    pub fn chat_contents(turns: &[ModelTurn]) -> Vec<Value> {
        turns
            .iter()
            .map(|turn| {
                let parts: Vec<Value> = turn.parts.iter().map(Self::part_to_value).collect();
                json!({"role": turn.role.as_str(), "parts": parts})
            })
            .collect()
    }

    fn part_to_value(part: &TurnPart) -> Value {
        match part {
            TurnPart::Text(text) => json!({"text": text}),
            TurnPart::Image(image) => json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.data,
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InlineImage, TurnRole};

    fn sample_image() -> InlineImage {
        InlineImage {
            mime_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        }
    }

    #[test]
    fn structured_contents_carry_text_then_image() {
        let request = StructuredRequest {
            instruction: "analyze".to_string(),
            media: Some(sample_image()),
            response_schema: json!({}),
        };
        let contents = WireAdapter::structured_contents(&request);
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        let parts = contents[0]["parts"].as_array().expect("parts array");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "analyze");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "aGVsbG8=");
    }

    #[test]
    fn structured_contents_omit_missing_media() {
        let request = StructuredRequest {
            instruction: "advise".to_string(),
            media: None,
            response_schema: json!({}),
        };
        let contents = WireAdapter::structured_contents(&request);
        let parts = contents[0]["parts"].as_array().expect("parts array");
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn chat_contents_preserve_roles_and_part_order() {
        let turns = vec![
            ModelTurn::text(TurnRole::User, "Is this serious?"),
            ModelTurn::text(TurnRole::Model, "It looks mild."),
            ModelTurn {
                role: TurnRole::User,
                parts: vec![
                    TurnPart::Image(sample_image()),
                    TurnPart::Text("Should I see a doctor?".to_string()),
                ],
            },
        ];
        let contents = WireAdapter::chat_contents(&turns);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        let last = contents[2]["parts"].as_array().expect("parts array");
        assert!(last[0]["inline_data"].is_object());
        assert_eq!(last[1]["text"], "Should I see a doctor?");
    }
}
