//! Declarative output contracts
//!
//! Each structured flow pairs its input with an output contract: a named list
//! of fields, each carrying a semantic description. The descriptions are part
//! of the contract, not documentation - they are rendered into the schema
//! sent to the model and drive the validation of whatever comes back.

use serde_json::{Map, Value, json};
use thiserror::Error;

/// One output field with the description that steers the model.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// An output shape: every field must come back as a non-empty string.
#[derive(Debug, Clone, Copy)]
pub struct OutputContract {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Ways a model payload can fail its output contract.
#[derive(Debug, Error)]
pub enum OutputViolation {
    #[error("payload is empty")]
    Empty,
    #[error("payload is not an object")]
    NotAnObject,
    #[error("field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("field '{field}' is not a string")]
    WrongType { field: &'static str },
    #[error("field '{field}' is empty")]
    EmptyField { field: &'static str },
}

impl OutputContract {
    /// Render the `responseSchema` sent alongside a structured request.
    pub fn response_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            properties.insert(
                field.name.to_string(),
                json!({"type": "STRING", "description": field.description}),
            );
        }
        let required: Vec<&str> = self.fields.iter().map(|f| f.name).collect();
        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
            "propertyOrdering": required,
        })
    }

    /// Validate a raw model payload against this contract. A payload that
    /// passes deserializes cleanly into the flow's output type.
    pub fn coerce<'a>(&self, payload: &'a Value) -> Result<&'a Map<String, Value>, OutputViolation> {
        let map = match payload {
            Value::Null => return Err(OutputViolation::Empty),
            Value::Object(map) if map.is_empty() => return Err(OutputViolation::Empty),
            Value::Object(map) => map,
            _ => return Err(OutputViolation::NotAnObject),
        };

        for field in self.fields {
            match map.get(field.name) {
                None => return Err(OutputViolation::MissingField { field: field.name }),
                Some(Value::String(text)) if text.trim().is_empty() => {
                    return Err(OutputViolation::EmptyField { field: field.name });
                }
                Some(Value::String(_)) => {}
                Some(_) => return Err(OutputViolation::WrongType { field: field.name }),
            }
        }
        Ok(map)
    }
}

/// Substitute `{{{name}}}` placeholders with input values. Absent fields
/// render as empty, matching how optional inputs behave in the templates.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in values {
        let placeholder = ["{{{", name, "}}}"].concat();
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}
