//! Structured flows - the four request/response contracts exposed to callers
//!
//! Each flow validates its input before any network attempt, renders a fixed
//! instruction template, invokes the model facade, and validates the output
//! against its contract. A request either yields a fully validated result or
//! no result at all.

pub mod analysis;
pub mod care;
pub mod chat;
pub mod medication;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::application::schema::OutputContract;
use crate::infrastructure::model::{GenerativeModel, ModelError, StructuredRequest};

pub use analysis::{AnalysisInput, SkinReport, analyze};
pub use care::{CareInput, CarePlan, suggest_care};
pub use chat::{ChatInput, ask};
pub use medication::{MedicationInput, MedicationPlan, recommend_medication};

/// Flow errors. All kinds surface to the end user through the same generic
/// message; the distinction lives in logs only.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },
    #[error("model returned no usable output")]
    EmptyResponse,
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl FlowError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// User-facing failure text. Deliberately identical for every kind of
    /// failure; callers wanting diagnostics read the error itself or the logs.
    pub fn user_message(&self) -> String {
        "An error occurred during analysis. Please try again.".to_string()
    }
}

/// Reject empty required text fields before any network cost is incurred.
fn required(field: &'static str, value: &str) -> Result<(), FlowError> {
    if value.trim().is_empty() {
        return Err(FlowError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Shared tail of the one-shot structured flows: invoke the facade, validate
/// the payload against the contract, and deserialize into the typed output.
async fn invoke_structured<T: DeserializeOwned>(
    model: &dyn GenerativeModel,
    flow: &'static str,
    request: StructuredRequest,
    contract: &OutputContract,
) -> Result<T, FlowError> {
    let payload = model.invoke(request).await?;
    if let Err(violation) = contract.coerce(&payload) {
        warn!(flow, contract = contract.name, %violation, "Model returned no usable output");
        return Err(FlowError::EmptyResponse);
    }
    serde_json::from_value(payload).map_err(|err| {
        warn!(flow, contract = contract.name, %err, "Model payload failed to deserialize");
        FlowError::EmptyResponse
    })
}
