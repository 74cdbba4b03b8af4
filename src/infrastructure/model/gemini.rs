//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::adapter::WireAdapter;
use super::traits::GenerativeModel;
use super::types::{GenerateRequest, ModelError, StructuredRequest};
use crate::config::ModelConfig;

/// Live client for the Google Generative Language API.
#[derive(Clone)]
pub struct GeminiModel {
    http: Client,
    endpoint: String,
    api_path: String,
    model: String,
    api_key: String,
}

impl GeminiModel {
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.endpoint.clone(),
            api_path: config.api_path.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_content_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        format!("{base}/{path}/{}:generateContent", self.model)
    }

    async fn post(&self, payload: &Value) -> Result<GeminiResponse, ModelError> {
        let url = format!("{}?key={}", self.generate_content_url(), self.api_key);
        self.http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(ModelError::network)?
            .error_for_status()
            .map_err(ModelError::network)?
            .json()
            .await
            .map_err(ModelError::network)
    }

    fn first_text(response: GeminiResponse) -> Result<String, ModelError> {
        response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| ModelError::invalid_response("response carried no text part"))
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn invoke(&self, request: StructuredRequest) -> Result<Value, ModelError> {
        let contents = WireAdapter::structured_contents(&request);
        info!(
            model = self.model.as_str(),
            has_media = request.media.is_some(),
            "Sending structured request to Gemini"
        );

        let payload = json!({
            "contents": contents,
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            }
        });
        let response = self.post(&payload).await?;
        debug!("Received structured response from Gemini");

        let text = Self::first_text(response)?;
        serde_json::from_str(&text)
            .map_err(|err| ModelError::invalid_response(format!("payload is not valid JSON: {err}")))
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError> {
        let mut payload = json!({
            "contents": WireAdapter::chat_contents(&request.turns),
        });
        if !request.system.trim().is_empty() {
            payload["system_instruction"] = json!({
                "parts": [{"text": request.system}]
            });
        }

        info!(
            model = self.model.as_str(),
            turns = request.turns.len(),
            "Sending chat request to Gemini"
        );
        let response = self.post(&payload).await?;
        debug!("Received chat response from Gemini");

        Self::first_text(response)
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_endpoint_path_and_model() {
        let config = ModelConfig {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/".to_string(),
            api_path: "v1beta/models".to_string(),
        };
        let client = GeminiModel::new(&config, "key");
        assert_eq!(
            client.generate_content_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn first_text_finds_the_first_populated_part() {
        let response = GeminiResponse {
            candidates: Some(vec![GeminiCandidate {
                content: Some(GeminiContent {
                    parts: vec![
                        GeminiPart { text: None },
                        GeminiPart {
                            text: Some("hello".to_string()),
                        },
                    ],
                }),
            }]),
        };
        assert_eq!(GeminiModel::first_text(response).expect("text"), "hello");
    }

    #[test]
    fn first_text_fails_when_no_candidate_has_text() {
        let response = GeminiResponse { candidates: None };
        assert!(matches!(
            GeminiModel::first_text(response),
            Err(ModelError::InvalidResponse { .. })
        ));
    }
}
