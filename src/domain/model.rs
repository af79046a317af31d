use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplificationRequest {
    pub text: String,
}

/// The canonical five-field result every response is coerced into.
/// List fields are always present, never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplificationResult {
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub eligibility: Vec<String>,
    pub action_steps: Vec<String>,
}

impl SimplificationResult {
    /// Degraded result for upstream payloads that carry no JSON object.
    pub fn freeform(text: &str) -> Self {
        Self {
            summary: text.trim().to_string(),
            ..Self::default()
        }
    }
}

/// A model-supplied field before coercion. Models return "maybe an array,
/// maybe a scalar, maybe nothing" for the list fields; this closes that
/// open set so coercion is total.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    #[default]
    Absent,
    Scalar(String),
    Many(Vec<String>),
}

impl FieldValue {
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Absent,
            Value::Bool(false) => FieldValue::Absent,
            Value::Bool(true) => FieldValue::Scalar("true".to_string()),
            Value::Number(n) => {
                if n.as_f64() == Some(0.0) {
                    FieldValue::Absent
                } else {
                    FieldValue::Scalar(n.to_string())
                }
            }
            Value::String(s) => {
                if s.trim().is_empty() {
                    FieldValue::Absent
                } else {
                    FieldValue::Scalar(s.clone())
                }
            }
            Value::Array(items) => FieldValue::Many(items.iter().map(element_text).collect()),
            Value::Object(_) => FieldValue::Scalar(value.to_string()),
        }
    }
}

fn element_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(FieldValue::from_json(&value))
    }
}

/// What the model actually sent back, field by field, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedFields {
    pub summary: FieldValue,
    pub pros: FieldValue,
    pub cons: FieldValue,
    pub eligibility: FieldValue,
    pub action_steps: FieldValue,
}

/// Instruction pair sent to the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}
