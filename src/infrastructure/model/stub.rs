//! Offline stub - deterministic substitute used when no credential is set

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::traits::GenerativeModel;
use super::types::{GenerateRequest, ModelError, StructuredRequest};

/// Substitute for the live client in an unconfigured deployment. Every
/// operation fails immediately with a missing-credentials error; it performs
/// no network access and never returns a result.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineModel;

#[async_trait]
impl GenerativeModel for OfflineModel {
    async fn invoke(&self, _request: StructuredRequest) -> Result<Value, ModelError> {
        warn!("Structured request attempted without a configured credential");
        Err(ModelError::missing_credentials())
    }

    async fn generate(&self, _request: GenerateRequest) -> Result<String, ModelError> {
        warn!("Chat request attempted without a configured credential");
        Err(ModelError::missing_credentials())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TurnRole;
    use crate::infrastructure::model::types::ModelTurn;
    use serde_json::json;

    #[tokio::test]
    async fn every_operation_fails_with_credential_guidance() {
        let stub = OfflineModel;

        let invoke_err = stub
            .invoke(StructuredRequest {
                instruction: "analyze".to_string(),
                media: None,
                response_schema: json!({}),
            })
            .await
            .expect_err("stub never succeeds");
        assert!(invoke_err.to_string().contains("GEMINI_API_KEY"));

        let generate_err = stub
            .generate(GenerateRequest {
                system: "system".to_string(),
                turns: vec![ModelTurn::text(TurnRole::User, "hi")],
            })
            .await
            .expect_err("stub never succeeds");
        assert!(generate_err.to_string().contains("GOOGLE_API_KEY"));
        assert!(matches!(
            generate_err,
            ModelError::MissingCredentials { .. }
        ));
    }
}
