//! Two-stage decoding of completion text
//!
//! Models are asked for bare JSON but often wrap it in prose or markdown
//! fences. Decoding first tries a strict parse of the whole text, then falls
//! back to the largest balanced `{...}` region.

use garden_core::{GardenError, Result};
use serde_json::{Map, Value};

/// Strict parse of the whole (trimmed) text
pub fn parse_strict(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text.trim())?)
}

/// Find the largest top-level balanced `{...}` region.
///
/// Braces inside JSON strings (including escaped quotes) are ignored. An
/// opening brace that is never closed yields no region.
pub fn extract_braced(text: &str) -> Option<&str> {
    let mut best: Option<(usize, usize)> = None;
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let end = i + c.len_utf8();
                    if best.map_or(true, |(s, e)| end - start > e - s) {
                        best = Some((start, end));
                    }
                }
            }
            _ => {}
        }
    }

    best.map(|(s, e)| &text[s..e])
}

/// Decode completion text into a JSON object
pub fn decode_completion(text: &str) -> Result<Map<String, Value>> {
    if let Ok(Value::Object(map)) = parse_strict(text) {
        return Ok(map);
    }

    let region = extract_braced(text)
        .ok_or_else(|| GardenError::Decode("No JSON object found in response".to_string()))?;
    match serde_json::from_str(region) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(GardenError::Decode(
            "Extracted region is not a JSON object".to_string(),
        )),
        Err(e) => Err(GardenError::Decode(format!(
            "Extracted JSON is malformed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_json() {
        let map = decode_completion(r#"  {"name": "Fern"}  "#).unwrap();
        assert_eq!(map["name"], json!("Fern"));
    }

    #[test]
    fn test_prose_and_fences() {
        let text = "Here is your plant:\n```json\n{\"name\": \"Fern\", \"petals\": 5}\n```\nEnjoy!";
        let map = decode_completion(text).unwrap();
        assert_eq!(map["petals"], json!(5));
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"Result: {"name": "Curly } Brace", "description": "says \"{hi}\""} done"#;
        let region = extract_braced(text).unwrap();
        assert_eq!(
            region,
            r#"{"name": "Curly } Brace", "description": "says \"{hi}\""}"#
        );
        assert_eq!(decode_completion(text).unwrap()["name"], json!("Curly } Brace"));
    }

    #[test]
    fn test_largest_region_wins() {
        let text = r#"Example {"a": 1}. Actual: {"name": "Fern", "colors": [[1, 2, 3]]}"#;
        assert_eq!(
            extract_braced(text),
            Some(r#"{"name": "Fern", "colors": [[1, 2, 3]]}"#)
        );
    }

    #[test]
    fn test_array_wrapped_object() {
        let map = decode_completion(r#"[{"name": "Fern"}]"#).unwrap();
        assert_eq!(map["name"], json!("Fern"));
    }

    #[test]
    fn test_no_object() {
        assert!(matches!(
            decode_completion("I cannot help with that."),
            Err(GardenError::Decode(_))
        ));
        assert_eq!(extract_braced(r#"{"unterminated": true"#), None);
    }

    #[test]
    fn test_malformed_region() {
        let err = decode_completion("Sure! {name: Fern}").unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_parse_strict_rejects_prose() {
        assert!(parse_strict("ok {\"a\": 1}").is_err());
        assert_eq!(parse_strict("[1, 2]").unwrap(), json!([1, 2]));
    }
}
