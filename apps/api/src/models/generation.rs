use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum description length, in characters, after trimming.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Request body for `POST /api/generate`.
///
/// `description` is optional at the serde level so a missing field surfaces as
/// an input error with the localized message instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// One marketing selling point. Order in `GenerationResult::selling_points`
/// is presentation order.
///
/// Items are never validated, so decoding accepts any JSON value: missing, null
/// or non-text fields become `""` and a bare string item becomes the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct SellingPoint {
    pub title: String,
    pub description: String,
}

/// Text form of a loosely-typed field: strings as-is, numbers and booleans
/// printed, everything else empty.
fn lenient_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

impl From<Value> for SellingPoint {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                title: lenient_text(fields.get("title")),
                description: lenient_text(fields.get("description")),
            },
            other => Self {
                title: lenient_text(Some(&other)),
                description: String::new(),
            },
        }
    }
}

/// The structured marketing copy returned to the caller.
///
/// Only constructed through `generation::validation::validate_result`, which
/// guarantees every string is non-empty and `selling_points` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub value_proposition: String,
    pub selling_points: Vec<SellingPoint>,
    pub target_user: String,
    pub elevator_pitch: String,
    pub wechat_copy: String,
}
