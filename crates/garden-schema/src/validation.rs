//! Validation of decoded model output against a field specification table
//!
//! Every field in the table is checked; failures accumulate into one ordered
//! list with at most one message per field. Integer fields are coerced
//! (`"25"` and `25.0` become `25`) before their range is evaluated, and the
//! coerced value is written back into the candidate object by the caller of
//! [`validate_field`], never by the check itself.

use crate::field::{ArrayShape, FieldSpec, FieldType, KindSchema, NumberRule};
use crate::path;
use garden_core::{GardenError, Result};
use serde_json::Value;

/// Accepted, normalized object or the full list of field-level errors
pub type ValidationResult = std::result::Result<Value, Vec<String>>;

/// Result of checking a single field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldOutcome {
    /// Replacement value when the raw value was coerced or canonicalized
    pub value: Option<Value>,
    pub error: Option<String>,
}

impl FieldOutcome {
    fn pass(value: Option<Value>) -> Self {
        Self { value, error: None }
    }

    fn fail(value: Option<Value>, error: String) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }
}

/// Validate a whole candidate object against a schema
pub fn validate_object(schema: &KindSchema, mut candidate: Value) -> ValidationResult {
    let mut errors = Vec::new();

    for spec in &schema.fields {
        let outcome = validate_field(path::lookup(&candidate, &spec.path), spec);
        if let Some(value) = outcome.value {
            path::assign(&mut candidate, &spec.path, value);
        }
        if let Some(error) = outcome.error {
            errors.push(error);
        }
    }

    if errors.is_empty() {
        Ok(candidate)
    } else {
        Err(errors)
    }
}

impl KindSchema {
    /// Validate and convert failures into [`GardenError::ValidationFailed`]
    pub fn validate(&self, candidate: Value) -> Result<Value> {
        validate_object(self, candidate).map_err(|errors| GardenError::ValidationFailed {
            kind: self.kind.clone(),
            errors,
        })
    }
}

/// Check one field. `value` is `None` when the path does not resolve.
pub fn validate_field(value: Option<&Value>, spec: &FieldSpec) -> FieldOutcome {
    let raw = match value {
        None | Some(Value::Null) => {
            return if spec.required {
                FieldOutcome::fail(None, format!("{} is missing", spec.path))
            } else {
                FieldOutcome::default()
            };
        }
        Some(raw) => raw,
    };

    match &spec.field_type {
        FieldType::String => match raw.as_str() {
            Some(s) if !s.is_empty() => FieldOutcome::default(),
            _ => FieldOutcome::fail(
                None,
                format!(
                    "Invalid {}: expected non-empty string, got {}",
                    spec.path,
                    preview(raw)
                ),
            ),
        },
        FieldType::Number {
            min,
            max,
            allow_float,
        } => check_number(&spec.path, raw, *min, *max, *allow_float),
        FieldType::Boolean => {
            if raw.is_boolean() {
                FieldOutcome::default()
            } else {
                FieldOutcome::fail(
                    None,
                    format!("Invalid {}: expected boolean, got {}", spec.path, preview(raw)),
                )
            }
        }
        FieldType::Enum { values } => match raw.as_str() {
            Some(s) if values.iter().any(|v| v == s) => FieldOutcome::default(),
            _ => FieldOutcome::fail(
                None,
                format!(
                    "Invalid {}: {} is not one of [{}]",
                    spec.path,
                    preview(raw),
                    values.join(", ")
                ),
            ),
        },
        FieldType::Array { shape } => {
            let Some(items) = raw.as_array() else {
                return FieldOutcome::fail(
                    None,
                    format!("Invalid {}: expected array, got {}", spec.path, preview(raw)),
                );
            };
            match shape {
                None => FieldOutcome::default(),
                Some(shape) => match check_shape(items, shape) {
                    Ok(canonical) => FieldOutcome::pass(canonical.map(Value::Array)),
                    Err(reason) => {
                        FieldOutcome::fail(None, format!("Invalid {}: {}", spec.path, reason))
                    }
                },
            }
        }
    }
}

fn check_number(
    path: &str,
    raw: &Value,
    min: Option<f64>,
    max: Option<f64>,
    allow_float: bool,
) -> FieldOutcome {
    let coerced = if allow_float {
        None
    } else {
        coerce_integer(raw)
    };
    let candidate = coerced.as_ref().unwrap_or(raw);

    let Some(n) = candidate.as_f64() else {
        return FieldOutcome::fail(
            None,
            format!("Invalid {}: expected number, got {}", path, preview(raw)),
        );
    };

    if !allow_float && !is_integer(candidate) {
        let message = format!("Invalid {}: expected integer, got {}", path, candidate);
        return FieldOutcome::fail(coerced, message);
    }

    let rule = NumberRule {
        min,
        max,
        integer: !allow_float,
    };
    if rule.contains(n) {
        FieldOutcome::pass(coerced)
    } else {
        let message = format!("Invalid {}: {} is not {}", path, candidate, rule.describe());
        FieldOutcome::fail(coerced, message)
    }
}

/// Coerce a near-integer value. Returns `None` when the value is already an
/// integer or cannot be coerced (the raw value is then kept).
pub fn coerce_integer(raw: &Value) -> Option<Value> {
    match raw {
        Value::Number(n) if n.is_i64() || n.is_u64() => None,
        Value::Number(n) => {
            let rounded = (n.as_f64()? + 0.5).floor();
            if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
                Some(Value::from(rounded as i64))
            } else {
                None
            }
        }
        Value::String(s) => parse_leading_integer(s).map(Value::from),
        _ => None,
    }
}

/// Parse the leading integer of a string: `" 42"`, `"25.7"` and `"12px"`
/// give 42, 25 and 12; `"abc"` gives `None`.
fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    format!("{}{}", sign, digits).parse().ok()
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// Check an array against its shape. On success returns the canonicalized
/// array when any element changed (integral floats such as `255.0` become `255`).
fn check_shape(
    items: &[Value],
    shape: &ArrayShape,
) -> std::result::Result<Option<Vec<Value>>, String> {
    match shape {
        ArrayShape::Tuples {
            min_len,
            max_len,
            channels,
        } => {
            check_len(items.len(), *min_len, *max_len)?;
            let mut changed = false;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let tuple = item
                    .as_array()
                    .filter(|t| t.len() == channels.len())
                    .ok_or_else(|| {
                        format!(
                            "entry {} must be an array of {} numbers, got {}",
                            i,
                            channels.len(),
                            preview(item)
                        )
                    })?;
                let mut canonical = Vec::with_capacity(tuple.len());
                for (j, (value, rule)) in tuple.iter().zip(channels).enumerate() {
                    match check_element(value, rule)
                        .map_err(|reason| format!("entry {} channel {}: {}", i, j, reason))?
                    {
                        Some(v) => {
                            changed = true;
                            canonical.push(v);
                        }
                        None => canonical.push(value.clone()),
                    }
                }
                out.push(Value::Array(canonical));
            }
            Ok(changed.then_some(out))
        }
        ArrayShape::Pair { element, ordered } => {
            if items.len() != 2 {
                return Err(format!(
                    "expected [min, max] pair, got {} elements",
                    items.len()
                ));
            }
            let out = check_elements(items, element)?;
            let (lo, hi) = (
                items[0].as_f64().unwrap_or_default(),
                items[1].as_f64().unwrap_or_default(),
            );
            if *ordered && lo > hi {
                return Err(format!("min {} is greater than max {}", items[0], items[1]));
            }
            Ok(out)
        }
        ArrayShape::Numbers {
            min_len,
            max_len,
            element,
        } => {
            check_len(items.len(), *min_len, *max_len)?;
            check_elements(items, element)
        }
        ArrayShape::Strings { min_len, max_len } => {
            check_len(items.len(), *min_len, *max_len)?;
            match items.iter().position(|v| !v.is_string()) {
                Some(i) => Err(format!("element {} is not a string", i)),
                None => Ok(None),
            }
        }
    }
}

fn check_elements(
    items: &[Value],
    rule: &NumberRule,
) -> std::result::Result<Option<Vec<Value>>, String> {
    let mut changed = false;
    let mut out = Vec::with_capacity(items.len());
    for (i, value) in items.iter().enumerate() {
        match check_element(value, rule).map_err(|reason| format!("element {}: {}", i, reason))? {
            Some(v) => {
                changed = true;
                out.push(v);
            }
            None => out.push(value.clone()),
        }
    }
    Ok(changed.then_some(out))
}

fn check_element(value: &Value, rule: &NumberRule) -> std::result::Result<Option<Value>, String> {
    let Some(n) = value.as_f64() else {
        return Err(format!("{} is not a number", preview(value)));
    };
    let mut canonical = None;
    if rule.integer {
        if n.fract() != 0.0 {
            return Err(format!("{} is not an integer", value));
        }
        if !(value.is_i64() || value.is_u64()) {
            canonical = Some(Value::from(n as i64));
        }
    }
    if !rule.contains(n) {
        return Err(format!("{} is not {}", value, rule.describe()));
    }
    Ok(canonical)
}

fn check_len(len: usize, min: usize, max: usize) -> std::result::Result<(), String> {
    if len >= min && len <= max {
        return Ok(());
    }
    let expected = if max == usize::MAX {
        format!("at least {}", min)
    } else if min == max {
        format!("exactly {}", min)
    } else {
        format!("{}-{}", min, max)
    };
    Err(format!("expected {} entries, got {}", expected, len))
}

/// Compact JSON rendering for error messages, truncated for long values
fn preview(value: &Value) -> String {
    const LIMIT: usize = 80;
    let text = value.to_string();
    if text.chars().count() > LIMIT {
        let cut: String = text.chars().take(LIMIT).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_test_schema() -> KindSchema {
        KindSchema::new(
            "test",
            vec![
                FieldSpec::string("name"),
                FieldSpec::integer("petals", 1.0, 40.0),
                FieldSpec::float("intensity", 0.5, 1.0),
                FieldSpec::one_of("oscillator", &["sine", "square"]),
                FieldSpec::boolean("glows").optional(),
                FieldSpec::array(
                    "size",
                    ArrayShape::Pair {
                        element: NumberRule::float(5.0, 150.0),
                        ordered: true,
                    },
                ),
                FieldSpec::integer("nested.count", 0.0, 10.0),
            ],
        )
    }

    fn valid_candidate() -> Value {
        json!({
            "name": "Glowbell",
            "petals": 12,
            "intensity": 0.75,
            "oscillator": "sine",
            "size": [40, 70],
            "nested": { "count": 3 }
        })
    }

    #[test]
    fn test_valid_data() {
        let candidate = valid_candidate();
        let accepted = validate_object(&make_test_schema(), candidate.clone()).unwrap();
        assert_eq!(accepted, candidate);
    }

    #[test]
    fn test_integer_coercion_from_string_and_float() {
        let mut candidate = valid_candidate();
        candidate["petals"] = json!("25");
        candidate["nested"]["count"] = json!(2.6);

        let accepted = validate_object(&make_test_schema(), candidate).unwrap();
        assert_eq!(accepted["petals"], json!(25));
        assert_eq!(accepted["nested"]["count"], json!(3));
    }

    #[test]
    fn test_coercion_applies_before_range_check() {
        let mut candidate = valid_candidate();
        candidate["petals"] = json!(40.4);
        assert_eq!(
            validate_object(&make_test_schema(), candidate).unwrap()["petals"],
            json!(40)
        );

        let mut candidate = valid_candidate();
        candidate["petals"] = json!(40.5);
        let errors = validate_object(&make_test_schema(), candidate).unwrap_err();
        assert_eq!(errors, vec!["Invalid petals: 41 is not between 1 and 40"]);
    }

    #[test]
    fn test_non_numeric_string_fails_type_check() {
        let mut candidate = valid_candidate();
        candidate["petals"] = json!("many");
        let errors = validate_object(&make_test_schema(), candidate).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Invalid petals: expected number"));
    }

    #[test]
    fn test_float_field_is_not_coerced() {
        let mut candidate = valid_candidate();
        candidate["intensity"] = json!("0.8");
        let errors = validate_object(&make_test_schema(), candidate).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("intensity"));
    }

    #[test]
    fn test_missing_and_null_reported() {
        let mut candidate = valid_candidate();
        candidate.as_object_mut().unwrap().remove("name");
        candidate["oscillator"] = Value::Null;

        let errors = validate_object(&make_test_schema(), candidate).unwrap_err();
        assert_eq!(errors, vec!["name is missing", "oscillator is missing"]);
    }

    #[test]
    fn test_missing_optional_field_is_not_reported() {
        let accepted = validate_object(&make_test_schema(), valid_candidate()).unwrap();
        assert!(accepted.get("glows").is_none());
    }

    #[test]
    fn test_every_violated_field_reported_once() {
        let candidate = json!({
            "name": "",
            "petals": 99,
            "intensity": 2.0,
            "oscillator": "bell",
            "glows": "yes",
            "size": [90, 40],
            "nested": {}
        });

        let errors = validate_object(&make_test_schema(), candidate).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors[3].contains("[sine, square]"));
        assert!(errors[5].contains("min 90 is greater than max 40"));
        assert_eq!(errors[6], "nested.count is missing");
    }

    #[test]
    fn test_non_object_candidate_reports_required_fields() {
        let errors = validate_object(&make_test_schema(), json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.len(), make_test_schema().required_paths().len());
    }

    #[test]
    fn test_tuple_channels_canonicalize_integral_floats() {
        let spec = FieldSpec::array(
            "colors",
            ArrayShape::Tuples {
                min_len: 1,
                max_len: 3,
                channels: vec![NumberRule::int(0.0, 255.0); 3],
            },
        );
        let value = json!([[255.0, 0, 10]]);
        let outcome = validate_field(Some(&value), &spec);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.value, Some(json!([[255, 0, 10]])));

        let value = json!([[255, 0, 10], [1, 2]]);
        let outcome = validate_field(Some(&value), &spec);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Invalid colors: entry 1 must be an array of 3 numbers, got [1,2]")
        );
    }

    #[test]
    fn test_validate_field_is_pure() {
        let spec = FieldSpec::integer("petals", 1.0, 40.0);
        let raw = json!("12");
        let outcome = validate_field(Some(&raw), &spec);
        assert_eq!(outcome.value, Some(json!(12)));
        assert_eq!(raw, json!("12"));
    }

    #[test]
    fn test_rejected_coercion_keeps_coerced_value() {
        let spec = FieldSpec::integer("petals", 1.0, 40.0);
        let outcome = validate_field(Some(&json!("90")), &spec);
        assert_eq!(outcome.value, Some(json!(90)));
        assert_eq!(
            outcome.error.as_deref(),
            Some("Invalid petals: 90 is not between 1 and 40")
        );

        let spec = FieldSpec::integer("petals", 1.0, 12.0);
        let outcome = validate_field(Some(&json!(12.5)), &spec);
        assert_eq!(outcome.value, Some(json!(13)));
        assert!(outcome.error.is_some());
    }

    #[test]
    fn test_parse_leading_integer() {
        assert_eq!(parse_leading_integer(" 42"), Some(42));
        assert_eq!(parse_leading_integer("25.7"), Some(25));
        assert_eq!(parse_leading_integer("-3px"), Some(-3));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer("-"), None);
    }

    #[test]
    fn test_kind_schema_validate_maps_error() {
        let err = make_test_schema().validate(json!({})).unwrap_err();
        match err {
            GardenError::ValidationFailed { kind, errors } => {
                assert_eq!(kind, "test");
                assert_eq!(errors.len(), 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
