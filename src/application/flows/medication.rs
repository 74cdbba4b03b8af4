//! Medicine recommendations, prevention tips, and follow-up guidance

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{FlowError, invoke_structured, required};
use crate::application::schema::{FieldSpec, OutputContract, render_template};
use crate::infrastructure::model::{GenerativeModel, StructuredRequest};

pub const MEDICATION_CONTRACT: OutputContract = OutputContract {
    name: "medicationPlan",
    fields: &[
        FieldSpec {
            name: "medicineRecommendations",
            description: "AI-driven medicine recommendations for the skin condition.",
        },
        FieldSpec {
            name: "preventionTips",
            description: "Prevention tips to avoid recurrence of the skin condition.",
        },
        FieldSpec {
            name: "followUpGuidance",
            description: "Guidance on when and how to follow up with a healthcare professional.",
        },
    ],
};

const INSTRUCTION_TEMPLATE: &str = "\
You are a dermatology expert providing guidance on skin conditions.

Based on the identified skin condition, severity level, and any provided patient details, generate medicine recommendations, prevention tips, and follow-up guidance.

Skin Condition: {{{skinCondition}}}
Severity Level: {{{severityLevel}}}
Patient Details: {{{patientDetails}}}

Provide actionable steps for treatment and prevention.
Format the output in a clear and concise manner.";

#[derive(Debug, Clone)]
pub struct MedicationInput {
    pub skin_condition: String,
    pub severity_level: String,
    pub patient_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationPlan {
    pub medicine_recommendations: String,
    pub prevention_tips: String,
    pub follow_up_guidance: String,
}

/// Generate treatment and prevention steps for an identified condition.
pub async fn recommend_medication(
    model: &dyn GenerativeModel,
    input: MedicationInput,
) -> Result<MedicationPlan, FlowError> {
    required("skin condition", &input.skin_condition)?;
    required("severity level", &input.severity_level)?;
    let details = input.patient_details.as_deref().unwrap_or("");

    let mut instruction = render_template(
        INSTRUCTION_TEMPLATE,
        &[
            ("skinCondition", input.skin_condition.as_str()),
            ("severityLevel", input.severity_level.as_str()),
            ("patientDetails", details),
        ],
    );
    // This flow restates its field contract inside the prompt itself.
    for field in MEDICATION_CONTRACT.fields {
        instruction.push('\n');
        instruction.push_str(field.description);
    }
    info!(
        flow = "medication",
        condition = input.skin_condition.as_str(),
        severity = input.severity_level.as_str(),
        "Requesting medication recommendations"
    );

    let request = StructuredRequest {
        instruction,
        media: None,
        response_schema: MEDICATION_CONTRACT.response_schema(),
    };
    invoke_structured(model, "medication", request, &MEDICATION_CONTRACT).await
}
