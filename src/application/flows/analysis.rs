//! Skin condition analysis from an uploaded image

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{FlowError, invoke_structured};
use crate::application::schema::{FieldSpec, OutputContract, render_template};
use crate::domain::InlineImage;
use crate::infrastructure::model::{GenerativeModel, StructuredRequest};

pub const REPORT_CONTRACT: OutputContract = OutputContract {
    name: "skinReport",
    fields: &[
        FieldSpec {
            name: "condition",
            description: "The detected skin condition or cancer type (e.g., Melanoma, Basal Cell Carcinoma).",
        },
        FieldSpec {
            name: "stage",
            description: "The estimated stage of the cancer or severity of the condition.",
        },
        FieldSpec {
            name: "requirements",
            description: "What is required for this stage/type (e.g., biopsy, immediate consultation, observation).",
        },
        FieldSpec {
            name: "careSuggestions",
            description: "Personalized care suggestions for managing the skin condition.",
        },
        FieldSpec {
            name: "medicineRecommendations",
            description: "AI-driven medicine recommendations for the condition.",
        },
        FieldSpec {
            name: "preventionTips",
            description: "Prevention tips to avoid recurrence of the condition.",
        },
        FieldSpec {
            name: "followUpGuidance",
            description: "Guidance on when and how to follow up with a healthcare professional.",
        },
    ],
};

const INSTRUCTION_TEMPLATE: &str = "\
You are a dermatology expert. Analyze the provided image of a skin condition.

Based on the visual analysis and any provided patient details, determine the likely condition, its stage or severity, and what medical actions are required (requirements).
Also provide care suggestions, medicine recommendations, prevention tips, and follow-up guidance.

Patient Details: {{{patientDetails}}}

Provide the output in a structured format.";

/// Input for the analysis flow. The image is a self-describing data URL;
/// patient details are optional free text.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub image: String,
    pub patient_details: Option<String>,
}

/// The full structured answer for one analyzed image. Immutable once
/// produced; held only for the duration of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinReport {
    pub condition: String,
    pub stage: String,
    pub requirements: String,
    pub care_suggestions: String,
    pub medicine_recommendations: String,
    pub prevention_tips: String,
    pub follow_up_guidance: String,
}

/// Analyze a skin image, attaching it inline alongside the rendered
/// instruction.
pub async fn analyze(
    model: &dyn GenerativeModel,
    input: AnalysisInput,
) -> Result<SkinReport, FlowError> {
    let image = InlineImage::from_data_url(&input.image)
        .map_err(|err| FlowError::validation("image", err.to_string()))?;
    let details = input.patient_details.as_deref().unwrap_or("");

    let instruction = render_template(INSTRUCTION_TEMPLATE, &[("patientDetails", details)]);
    info!(flow = "analysis", "Requesting skin condition analysis");

    let request = StructuredRequest {
        instruction,
        media: Some(image),
        response_schema: REPORT_CONTRACT.response_schema(),
    };
    invoke_structured(model, "analysis", request, &REPORT_CONTRACT).await
}
