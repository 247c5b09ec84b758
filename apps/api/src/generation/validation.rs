//! Result Validator — structural gate between parsed model output and the caller.
//!
//! Checks run in a fixed order and the first failure wins. Selling-point items are
//! only counted, not inspected. Content quality is never judged here.

use serde_json::Value;
use thiserror::Error;

use crate::models::generation::GenerationResult;

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("JSON structure invalid: expected an object")]
    NotAnObject,

    #[error("JSON structure invalid: `{0}` must be a non-empty string")]
    MissingText(&'static str),

    #[error("JSON structure invalid: `sellingPoints` must be a non-empty array")]
    MissingSellingPoints,

    #[error("JSON structure invalid: {0}")]
    Decode(String),
}

fn require_text(
    object: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<(), ShapeError> {
    match object.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        _ => Err(ShapeError::MissingText(key)),
    }
}

/// Checks the required shape without building the typed result.
pub fn check_shape(value: &Value) -> Result<(), ShapeError> {
    let object = value.as_object().ok_or(ShapeError::NotAnObject)?;

    require_text(object, "valueProposition")?;

    match object.get("sellingPoints") {
        Some(Value::Array(points)) if !points.is_empty() => {}
        _ => return Err(ShapeError::MissingSellingPoints),
    }

    require_text(object, "targetUser")?;
    require_text(object, "elevatorPitch")?;
    require_text(object, "wechatCopy")?;

    Ok(())
}

/// Validates a parsed reply and converts it into a `GenerationResult`.
/// Accepted whole or rejected whole; extra fields are dropped.
///
/// Once `check_shape` passes, decoding cannot fail: selling-point items decode
/// from any JSON value.
pub fn validate_result(value: Value) -> Result<GenerationResult, ShapeError> {
    check_shape(&value)?;
    serde_json::from_value(value).map_err(|e| ShapeError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "valueProposition": "自动报税",
            "sellingPoints": [
                {"title": "一键报税", "description": "省时省心"},
                {"title": "发票归档", "description": "拍照即存"}
            ],
            "targetUser": "自由职业者",
            "elevatorPitch": "你还在为报税头疼吗？",
            "wechatCopy": "终于不用熬夜报税了！"
        })
    }

    #[test]
    fn test_valid_object_passes_and_keeps_order() {
        let result = validate_result(valid()).unwrap();
        assert_eq!(result.value_proposition, "自动报税");
        assert_eq!(result.selling_points.len(), 2);
        assert_eq!(result.selling_points[0].title, "一键报税");
        assert_eq!(result.selling_points[1].title, "发票归档");
    }

    #[test]
    fn test_non_object_rejected() {
        assert_eq!(check_shape(&json!([1, 2])), Err(ShapeError::NotAnObject));
        assert_eq!(check_shape(&json!("text")), Err(ShapeError::NotAnObject));
        assert_eq!(check_shape(&Value::Null), Err(ShapeError::NotAnObject));
    }

    #[test]
    fn test_each_missing_field_rejected() {
        for key in [
            "valueProposition",
            "sellingPoints",
            "targetUser",
            "elevatorPitch",
            "wechatCopy",
        ] {
            let mut value = valid();
            value.as_object_mut().unwrap().remove(key);
            assert!(check_shape(&value).is_err(), "accepted without {key}");
        }
    }

    #[test]
    fn test_empty_string_fields_rejected() {
        for key in ["valueProposition", "targetUser", "elevatorPitch", "wechatCopy"] {
            let mut value = valid();
            value[key] = json!("");
            assert_eq!(check_shape(&value), Err(ShapeError::MissingText(key)));
        }
    }

    #[test]
    fn test_non_string_text_field_rejected() {
        let mut value = valid();
        value["targetUser"] = json!(["自由职业者"]);
        assert_eq!(
            check_shape(&value),
            Err(ShapeError::MissingText("targetUser"))
        );
    }

    #[test]
    fn test_empty_selling_points_rejected() {
        let mut value = valid();
        value["sellingPoints"] = json!([]);
        assert_eq!(check_shape(&value), Err(ShapeError::MissingSellingPoints));
    }

    #[test]
    fn test_selling_points_not_array_rejected() {
        let mut value = valid();
        value["sellingPoints"] = json!({"title": "一键报税"});
        assert_eq!(check_shape(&value), Err(ShapeError::MissingSellingPoints));
    }

    #[test]
    fn test_checks_run_in_order() {
        let value = json!({"sellingPoints": [], "wechatCopy": ""});
        assert_eq!(
            check_shape(&value),
            Err(ShapeError::MissingText("valueProposition"))
        );
    }

    #[test]
    fn test_selling_point_items_are_not_field_validated() {
        let mut value = valid();
        value["sellingPoints"] = json!([{"title": "只有标题"}]);
        let result = validate_result(value).unwrap();
        assert_eq!(result.selling_points[0].description, "");
    }

    #[test]
    fn test_loosely_typed_selling_points_still_pass() {
        let mut value = valid();
        value["sellingPoints"] = json!([
            {"title": "快", "description": null},
            "卖点一",
            {"title": 42},
            7
        ]);

        let result = validate_result(value).unwrap();

        let titles: Vec<&str> = result
            .selling_points
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, ["快", "卖点一", "42", "7"]);
        assert!(result.selling_points.iter().all(|p| p.description.is_empty()));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut value = valid();
        value["hashtags"] = json!(["#报税"]);
        assert!(validate_result(value).is_ok());
    }
}
