//! Free-form chat grounded in the uploaded image and prior exchanges

use tracing::{debug, info};

use super::{FlowError, required};
use crate::domain::{ChatTurn, InlineImage, TurnRole};
use crate::infrastructure::model::{GenerateRequest, GenerativeModel, ModelTurn, TurnPart};

/// Standing persona and caution for the chat assistant.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a helpful AI dermatology assistant.
The user has uploaded an image of a skin condition.
Answer their questions based on the visual evidence in the image and your medical knowledge.
Be helpful, cautious, and always remind them to see a doctor for a real diagnosis.";

/// Input for one chat exchange. The history is a snapshot taken before the
/// new question; it is replayed verbatim and never rewritten.
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub image: String,
    pub history: Vec<ChatTurn>,
    pub question: String,
}

/// Ask a follow-up question about the uploaded image. The history is
/// replayed in order, then one final user turn carries the image and the
/// question, in that order. The answer is returned verbatim - this flow has
/// no structured-output validation.
pub async fn ask(model: &dyn GenerativeModel, input: ChatInput) -> Result<String, FlowError> {
    required("question", &input.question)?;
    let image = InlineImage::from_data_url(&input.image)
        .map_err(|err| FlowError::validation("image", err.to_string()))?;

    let mut turns = Vec::with_capacity(input.history.len() + 1);
    for turn in &input.history {
        turns.push(ModelTurn::text(turn.role, turn.content.clone()));
    }
    turns.push(ModelTurn {
        role: TurnRole::User,
        parts: vec![
            TurnPart::Image(image),
            TurnPart::Text(input.question.clone()),
        ],
    });

    debug!(
        flow = "chat",
        history = input.history.len(),
        "Replaying chat history"
    );
    info!(flow = "chat", "Requesting chat answer");

    let answer = model
        .generate(GenerateRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            turns,
        })
        .await?;
    Ok(answer)
}
