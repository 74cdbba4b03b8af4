//! Model facade trait

use async_trait::async_trait;
use serde_json::Value;

use super::types::{GenerateRequest, ModelError, StructuredRequest};

/// A generative model capable of structured one-shot answers and free-form
/// chat. Every call is a single best-effort round trip: no retry, no caching,
/// no timeout beyond what the transport imposes.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send a rendered instruction (plus optional inline image) and return
    /// the raw structured payload the model produced.
    async fn invoke(&self, request: StructuredRequest) -> Result<Value, ModelError>;

    /// Send a system instruction and role-tagged turns, returning the
    /// generated text verbatim.
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError>;
}
