//! Diagnosis session state
//!
//! Tracks one analysis session as the caller sees it: `Idle -> Loading ->
//! { Results | Error }`, with an explicit reset back to `Idle`. The follow-up
//! chat keeps its own independent progress flag and may run regardless of the
//! analysis state, as long as an image is present.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use super::flows::{self, AnalysisInput, CareInput, ChatInput, FlowError, SkinReport};
use crate::domain::ChatTurn;
use crate::infrastructure::model::GenerativeModel;

/// Substituted when the caller provides no patient details.
pub const DEFAULT_PATIENT_DETAILS: &str = "No additional details provided.";

/// Caller-visible analysis lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisState {
    Idle,
    Loading,
    Results(SkinReport),
    Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an image is required")]
    ImageRequired,
    #[error("analysis can only start from an idle session")]
    NotIdle,
    #[error("a chat message is already being sent")]
    ChatInFlight,
    #[error("the chat question must not be empty")]
    EmptyQuestion,
}

/// One analysis session. All entities are transient; nothing survives a
/// reset. Results are written back as a single atomic state replacement -
/// no partial result is ever visible.
pub struct DiagnosisSession {
    id: String,
    state: DiagnosisState,
    image: Option<String>,
    patient_details: Option<String>,
    chat: Vec<ChatTurn>,
    chat_sending: bool,
}

impl Default for DiagnosisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosisSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            state: DiagnosisState::Idle,
            image: None,
            patient_details: None,
            chat: Vec::new(),
            chat_sending: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DiagnosisState {
        &self.state
    }

    pub fn report(&self) -> Option<&SkinReport> {
        match &self.state {
            DiagnosisState::Results(report) => Some(report),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat
    }

    pub fn is_chat_sending(&self) -> bool {
        self.chat_sending
    }

    pub fn attach_image(&mut self, data_url: impl Into<String>) {
        self.image = Some(data_url.into());
    }

    pub fn set_patient_details(&mut self, details: impl Into<String>) {
        self.patient_details = Some(details.into());
    }

    /// Clear everything and return to `Idle`. Nothing carries over.
    pub fn reset(&mut self) {
        self.state = DiagnosisState::Idle;
        self.image = None;
        self.patient_details = None;
        self.chat.clear();
        self.chat_sending = false;
    }

    fn begin_analysis(&mut self) -> Result<(), SessionError> {
        if self.state != DiagnosisState::Idle {
            return Err(SessionError::NotIdle);
        }
        self.state = DiagnosisState::Loading;
        Ok(())
    }

    /// Run one diagnosis through the given strategy. The session moves to
    /// `Loading` for the duration of the call and ends in `Results` or
    /// `Error`; failures carry the generic user-facing message only.
    pub async fn run_diagnosis(
        &mut self,
        model: &dyn GenerativeModel,
        strategy: &dyn AnalysisStrategy,
    ) -> Result<(), SessionError> {
        let image = self.image.clone().ok_or(SessionError::ImageRequired)?;
        self.begin_analysis()?;
        let details = self.patient_details.clone();

        match strategy.diagnose(model, &image, details.as_deref()).await {
            Ok(report) => {
                info!(
                    session = self.id.as_str(),
                    condition = report.condition.as_str(),
                    "Analysis complete"
                );
                self.state = DiagnosisState::Results(report);
            }
            Err(err) => {
                error!(session = self.id.as_str(), %err, "Analysis failed");
                self.state = DiagnosisState::Error(err.user_message());
            }
        }
        Ok(())
    }

    /// Run one chat exchange. Appends the user turn up front; the model turn
    /// is appended only on success, so a failed exchange leaves the question
    /// in the log without an answer.
    pub async fn run_chat(
        &mut self,
        model: &dyn GenerativeModel,
        question: &str,
    ) -> Result<(), SessionError> {
        let image = self.image.clone().ok_or(SessionError::ImageRequired)?;
        if self.chat_sending {
            return Err(SessionError::ChatInFlight);
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        // Snapshot before the new turn: the model sees the history as it was
        // at call time, with the question arriving in the final turn.
        let history = self.chat.clone();
        self.chat.push(ChatTurn::user(question));
        self.chat_sending = true;

        let result = flows::chat::ask(
            model,
            ChatInput {
                image,
                history,
                question: question.to_string(),
            },
        )
        .await;
        self.chat_sending = false;

        match result {
            Ok(answer) => self.chat.push(ChatTurn::model(answer)),
            Err(err) => {
                error!(session = self.id.as_str(), %err, "Chat exchange failed");
            }
        }
        Ok(())
    }
}

/// The two observed variants of the diagnosis tool behind one capability
/// interface. Neither is privileged; callers pick one at construction time.
#[async_trait]
pub trait AnalysisStrategy: Send + Sync {
    async fn diagnose(
        &self,
        model: &dyn GenerativeModel,
        image: &str,
        patient_details: Option<&str>,
    ) -> Result<SkinReport, FlowError>;
}

/// Sends the image itself through the analysis flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullImageAnalysis;

#[async_trait]
impl AnalysisStrategy for FullImageAnalysis {
    async fn diagnose(
        &self,
        model: &dyn GenerativeModel,
        image: &str,
        patient_details: Option<&str>,
    ) -> Result<SkinReport, FlowError> {
        flows::analysis::analyze(
            model,
            AnalysisInput {
                image: image.to_string(),
                patient_details: Some(effective_details(patient_details)),
            },
        )
        .await
    }
}

/// Starts from a fixed preliminary detection and asks the model only for the
/// care plan, assembling the rest of the report locally.
#[derive(Debug, Clone)]
pub struct PresetConditionTriage {
    pub condition: String,
    pub severity: String,
    pub requirements: String,
}

impl Default for PresetConditionTriage {
    fn default() -> Self {
        Self {
            condition: "Eczema".to_string(),
            severity: "Mild".to_string(),
            requirements:
                "Observation and routine skin care; consult a dermatologist if symptoms persist."
                    .to_string(),
        }
    }
}

#[async_trait]
impl AnalysisStrategy for PresetConditionTriage {
    async fn diagnose(
        &self,
        model: &dyn GenerativeModel,
        _image: &str,
        patient_details: Option<&str>,
    ) -> Result<SkinReport, FlowError> {
        let plan = flows::care::suggest_care(
            model,
            CareInput {
                condition: self.condition.clone(),
                severity: self.severity.clone(),
                patient_details: effective_details(patient_details),
            },
        )
        .await?;

        Ok(SkinReport {
            condition: self.condition.clone(),
            stage: self.severity.clone(),
            requirements: self.requirements.clone(),
            care_suggestions: plan.care_suggestions,
            medicine_recommendations: plan.medicine_recommendations,
            prevention_tips: plan.prevention_tips,
            follow_up_guidance: plan.follow_up_guidance,
        })
    }
}

fn effective_details(details: Option<&str>) -> String {
    match details {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => DEFAULT_PATIENT_DETAILS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::model::{
        GenerateRequest, ModelError, OfflineModel, StructuredRequest,
    };
    use serde_json::{Value, json};

    const IMAGE: &str = "data:image/png;base64,aGVsbG8=";

    struct CannedModel {
        payload: Value,
        answer: String,
    }

    impl CannedModel {
        fn care_plan() -> Self {
            Self {
                payload: json!({
                    "careSuggestions": "keep the area clean",
                    "medicineRecommendations": "hydrocortisone cream",
                    "preventionTips": "avoid known triggers",
                    "followUpGuidance": "see a dermatologist within two weeks",
                }),
                answer: "It looks mild.".to_string(),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for CannedModel {
        async fn invoke(&self, _request: StructuredRequest) -> Result<Value, ModelError> {
            Ok(self.payload.clone())
        }

        async fn generate(&self, _request: GenerateRequest) -> Result<String, ModelError> {
            Ok(self.answer.clone())
        }
    }

    #[tokio::test]
    async fn diagnosis_requires_an_image() {
        let mut session = DiagnosisSession::new();
        let err = session
            .run_diagnosis(&OfflineModel, &FullImageAnalysis)
            .await
            .expect_err("no image attached");
        assert_eq!(err, SessionError::ImageRequired);
        assert_eq!(*session.state(), DiagnosisState::Idle);
    }

    #[tokio::test]
    async fn failed_diagnosis_lands_in_error_with_the_generic_message() {
        let mut session = DiagnosisSession::new();
        session.attach_image(IMAGE);
        session
            .run_diagnosis(&OfflineModel, &FullImageAnalysis)
            .await
            .expect("transition is valid");
        match session.state() {
            DiagnosisState::Error(message) => {
                assert_eq!(message, "An error occurred during analysis. Please try again.");
            }
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn preset_triage_assembles_a_full_report() {
        let mut session = DiagnosisSession::new();
        session.attach_image(IMAGE);
        session.set_patient_details("Age 54");
        session
            .run_diagnosis(&CannedModel::care_plan(), &PresetConditionTriage::default())
            .await
            .expect("transition is valid");
        let report = session.report().expect("results state");
        assert_eq!(report.condition, "Eczema");
        assert_eq!(report.stage, "Mild");
        assert_eq!(report.care_suggestions, "keep the area clean");
    }

    #[tokio::test]
    async fn analysis_cannot_restart_until_reset() {
        let mut session = DiagnosisSession::new();
        session.attach_image(IMAGE);
        session
            .run_diagnosis(&OfflineModel, &FullImageAnalysis)
            .await
            .expect("transition is valid");
        let err = session
            .run_diagnosis(&OfflineModel, &FullImageAnalysis)
            .await
            .expect_err("session is in the error state");
        assert_eq!(err, SessionError::NotIdle);

        session.reset();
        assert_eq!(*session.state(), DiagnosisState::Idle);
        assert!(session.image().is_none());
        assert!(session.chat_history().is_empty());
    }

    #[tokio::test]
    async fn chat_appends_one_user_and_one_model_turn_per_exchange() {
        let mut session = DiagnosisSession::new();
        session.attach_image(IMAGE);
        session
            .run_chat(&CannedModel::care_plan(), "Is this serious?")
            .await
            .expect("chat runs");
        let history = session.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], ChatTurn::user("Is this serious?"));
        assert_eq!(history[1], ChatTurn::model("It looks mild."));
        assert!(!session.is_chat_sending());
    }

    #[tokio::test]
    async fn failed_chat_keeps_the_question_without_an_answer() {
        let mut session = DiagnosisSession::new();
        session.attach_image(IMAGE);
        session
            .run_chat(&OfflineModel, "Is this serious?")
            .await
            .expect("failure is absorbed into the log");
        let history = session.chat_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], ChatTurn::user("Is this serious?"));
    }

    #[tokio::test]
    async fn chat_rejects_blank_questions_and_missing_images() {
        let mut session = DiagnosisSession::new();
        let err = session
            .run_chat(&OfflineModel, "anything")
            .await
            .expect_err("no image attached");
        assert_eq!(err, SessionError::ImageRequired);

        session.attach_image(IMAGE);
        let err = session
            .run_chat(&OfflineModel, "   ")
            .await
            .expect_err("blank question");
        assert_eq!(err, SessionError::EmptyQuestion);
    }
}
