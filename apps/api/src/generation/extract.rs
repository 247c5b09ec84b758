//! Result Extractor — pulls the JSON object out of a free-form model reply.
//!
//! Models wrap JSON in prose or markdown fences despite instructions. Fences are
//! removed anywhere in the text, then the span from the first `{` to the last `}`
//! is parsed. Taking the outermost pair keeps nested objects intact but means two
//! independent objects in one reply are parsed as a single (invalid) span.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// ```` ```json ```` (any case) or bare ```` ``` ````, plus trailing whitespace.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?\s*").expect("valid fence pattern"));

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("No JSON object found in response")]
    NoJsonFound,

    #[error("Malformed JSON in response: {0}")]
    MalformedJson(String),
}

/// Removes every markdown code-fence marker and trims the result.
fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Extracts and parses the outermost `{ ... }` span from a model reply.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let cleaned = strip_code_fences(text);

    let (first, last) = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(first), Some(last)) if last > first => (first, last),
        _ => return Err(ExtractError::NoJsonFound),
    };

    serde_json::from_str(&cleaned[first..=last])
        .map_err(|e| ExtractError::MalformedJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_bare_object() {
        assert_eq!(extract_json(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_extracts_from_json_fence() {
        let reply = "```json\n{\"valueProposition\": \"自动报税\"}\n```";
        assert_eq!(
            extract_json(reply).unwrap(),
            json!({"valueProposition": "自动报税"})
        );
    }

    #[test]
    fn test_extracts_from_uppercase_and_bare_fences() {
        assert_eq!(
            extract_json("```JSON\n{\"a\": 1}\n```").unwrap(),
            json!({"a": 1})
        );
        assert_eq!(extract_json("```\n{\"a\": 1}\n```").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_tolerates_surrounding_prose() {
        let reply = "好的，以下是结果：\n```json\n{\"a\": [1, 2]}\n```\n希望对你有帮助！";
        assert_eq!(extract_json(reply).unwrap(), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_keeps_nested_objects() {
        let reply = r#"Here: {"outer": {"inner": {"x": "y"}}, "list": [{"k": 1}]} done"#;
        assert_eq!(
            extract_json(reply).unwrap(),
            json!({"outer": {"inner": {"x": "y"}}, "list": [{"k": 1}]})
        );
    }

    #[test]
    fn test_no_braces_is_no_json_found() {
        assert_eq!(
            extract_json("抱歉，我无法完成这个请求。"),
            Err(ExtractError::NoJsonFound)
        );
        assert_eq!(extract_json(""), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_only_opening_brace_is_no_json_found() {
        assert_eq!(extract_json("{ \"a\": 1"), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_closing_before_opening_is_no_json_found() {
        assert_eq!(extract_json("} then {"), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_invalid_span_is_malformed_json() {
        let err = extract_json("{ valueProposition: 'single quotes' }").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedJson(msg) if !msg.is_empty()));
    }

    #[test]
    fn test_two_independent_objects_span_both_and_fail() {
        // Outermost-brace heuristic: the span covers both objects.
        let reply = r#"{"a": 1} and also {"b": 2}"#;
        assert!(matches!(
            extract_json(reply),
            Err(ExtractError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_fence_inside_string_values_is_stripped() {
        let reply = "{\"code\": \"```rust fn main() {}```\"}";
        assert_eq!(
            extract_json(reply).unwrap(),
            json!({"code": "rust fn main() {}"})
        );
    }
}
