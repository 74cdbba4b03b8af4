//! Personalized care suggestions for an already-identified condition

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{FlowError, invoke_structured, required};
use crate::application::schema::{FieldSpec, OutputContract, render_template};
use crate::infrastructure::model::{GenerativeModel, StructuredRequest};

pub const CARE_CONTRACT: OutputContract = OutputContract {
    name: "carePlan",
    fields: &[
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
You are a dermatology expert providing personalized care suggestions for skin conditions.

Based on the detected skin condition, its severity, and patient details, generate personalized care suggestions, medicine recommendations, prevention tips, and follow-up guidance.

Condition: {{{condition}}}
Severity: {{{severity}}}
Patient Details: {{{patientDetails}}}

Provide the output in a structured format.";

/// Input for the care-suggestion flow. Unlike the other structured flows,
/// patient details are required here.
#[derive(Debug, Clone)]
pub struct CareInput {
    pub condition: String,
    pub severity: String,
    pub patient_details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
    pub care_suggestions: String,
    pub medicine_recommendations: String,
    pub prevention_tips: String,
    pub follow_up_guidance: String,
}

/// Generate a care plan for a known condition and severity.
pub async fn suggest_care(
    model: &dyn GenerativeModel,
    input: CareInput,
) -> Result<CarePlan, FlowError> {
    required("condition", &input.condition)?;
    required("severity", &input.severity)?;
    required("patient details", &input.patient_details)?;

    let instruction = render_template(
        INSTRUCTION_TEMPLATE,
        &[
            ("condition", input.condition.as_str()),
            ("severity", input.severity.as_str()),
            ("patientDetails", input.patient_details.as_str()),
        ],
    );
    info!(
        flow = "care",
        condition = input.condition.as_str(),
        severity = input.severity.as_str(),
        "Requesting personalized care suggestions"
    );

    let request = StructuredRequest {
        instruction,
        media: None,
        response_schema: CARE_CONTRACT.response_schema(),
    };
    invoke_structured(model, "care", request, &CARE_CONTRACT).await
}
