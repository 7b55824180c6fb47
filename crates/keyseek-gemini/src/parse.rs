//! Validation of the model's JSON output into typed keyword records.
//!
//! The declared response schema is advisory to the generator; this pass is
//! the hard boundary. A malformed body or element fails the whole response
//! with `KeyseekError::Schema` rather than letting bad data flow downstream.

use keyseek_core::{KeywordResult, KeyseekError, Result};
use serde_json::Value;

/// Parse raw model output into keyword records.
pub fn parse_keywords(raw: &str) -> Result<Vec<KeywordResult>> {
    let trimmed = raw.trim();

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| KeyseekError::Schema(format!("response is not valid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(KeyseekError::Schema(format!(
            "expected a JSON array, got {}",
            type_name(&value)
        )));
    };

    let mut results = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        results.push(validate_element(idx, item)?);
    }
    Ok(results)
}

/// Per-element validation: a JSON object with a non-empty string `keyword`;
/// `vietnameseTranslation`, when present, must be a string (null is treated
/// as absent).
fn validate_element(idx: usize, item: Value) -> Result<KeywordResult> {
    let Value::Object(mut obj) = item else {
        return Err(KeyseekError::Schema(format!(
            "element {idx}: expected an object, got {}",
            type_name(&item)
        )));
    };

    let keyword = match obj.remove("keyword") {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::String(_)) => {
            return Err(KeyseekError::Schema(format!(
                "element {idx}: `keyword` is empty"
            )))
        }
        Some(other) => {
            return Err(KeyseekError::Schema(format!(
                "element {idx}: `keyword` must be a string, got {}",
                type_name(&other)
            )))
        }
        None => {
            return Err(KeyseekError::Schema(format!(
                "element {idx}: missing required field `keyword`"
            )))
        }
    };

    let vietnamese_translation = match obj.remove("vietnameseTranslation") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            return Err(KeyseekError::Schema(format!(
                "element {idx}: `vietnameseTranslation` must be a string, got {}",
                type_name(&other)
            )))
        }
    };

    Ok(KeywordResult {
        keyword,
        vietnamese_translation,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_array_is_an_identity_transform() {
        let raw = r#"[
            {"keyword": "sinh tồn rừng"},
            {"keyword": "mukbang cay", "vietnameseTranslation": "spicy mukbang"}
        ]"#;
        let results = parse_keywords(raw).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].keyword, "sinh tồn rừng");
        assert_eq!(results[0].vietnamese_translation, None);
        assert_eq!(results[1].keyword, "mukbang cay");
        assert_eq!(
            results[1].vietnamese_translation.as_deref(),
            Some("spicy mukbang")
        );
    }

    #[test]
    fn leading_and_trailing_whitespace_is_tolerated() {
        let results = parse_keywords("\n  [{\"keyword\": \"a b\"}]  \n").unwrap();
        assert_eq!(results[0].keyword, "a b");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_keywords("[]").unwrap().is_empty());
    }

    #[test]
    fn non_json_body_is_a_schema_error() {
        let err = parse_keywords("I'm sorry, I can't do that").unwrap_err();
        assert!(matches!(err, KeyseekError::Schema(_)), "got {err:?}");
    }

    #[test]
    fn non_array_body_is_a_schema_error() {
        for raw in [r#"{"keyword": "a"}"#, "\"text\"", "42", "null"] {
            let err = parse_keywords(raw).unwrap_err();
            assert!(matches!(err, KeyseekError::Schema(_)), "input {raw}");
        }
    }

    #[test]
    fn element_missing_keyword_is_a_schema_error() {
        let err = parse_keywords(r#"[{"vietnameseTranslation": "x"}]"#).unwrap_err();
        assert!(matches!(err, KeyseekError::Schema(_)));
        assert!(err.to_string().contains("element 0"));
    }

    #[test]
    fn empty_or_non_string_keyword_is_a_schema_error() {
        assert!(matches!(
            parse_keywords(r#"[{"keyword": "  "}]"#).unwrap_err(),
            KeyseekError::Schema(_)
        ));
        assert!(matches!(
            parse_keywords(r#"[{"keyword": 7}]"#).unwrap_err(),
            KeyseekError::Schema(_)
        ));
    }

    #[test]
    fn non_string_translation_is_a_schema_error() {
        let err =
            parse_keywords(r#"[{"keyword": "a b", "vietnameseTranslation": 1}]"#).unwrap_err();
        assert!(matches!(err, KeyseekError::Schema(_)));
    }

    #[test]
    fn null_or_blank_translation_is_treated_as_absent() {
        let results = parse_keywords(
            r#"[{"keyword": "a b", "vietnameseTranslation": null},
                {"keyword": "c d", "vietnameseTranslation": ""}]"#,
        )
        .unwrap();
        assert_eq!(results[0].vietnamese_translation, None);
        assert_eq!(results[1].vietnamese_translation, None);
    }

    #[test]
    fn error_names_the_offending_element() {
        let err = parse_keywords(r#"[{"keyword": "ok one"}, {"keyword": 3}]"#).unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }
}
