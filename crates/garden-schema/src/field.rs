//! Field specification tables
//!
//! A [`KindSchema`] is an ordered list of [`FieldSpec`] rows describing what
//! makes a decoded object valid for one content kind. Built-in tables are
//! constructed in code (see `kinds`); overrides can be loaded from TOML.

use garden_core::{GardenError, Result};
use serde::{Deserialize, Serialize};

/// Numeric bounds applied to a scalar or to each element of an array
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberRule {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Require an integral value
    #[serde(default)]
    pub integer: bool,
}

impl NumberRule {
    pub const fn int(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            integer: true,
        }
    }

    pub const fn float(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            integer: false,
        }
    }

    /// Integers of at least zero with no upper bound
    pub const fn non_negative_int() -> Self {
        Self {
            min: Some(0.0),
            max: None,
            integer: true,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Human-readable bounds, e.g. "between 1 and 40"
    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("between {} and {}", min, max),
            (Some(min), None) => format!("at least {}", min),
            (None, Some(max)) => format!("at most {}", max),
            (None, None) => "any number".to_string(),
        }
    }
}

/// Structural rule for an array-valued field
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayShape {
    /// A list of fixed-arity numeric tuples, one rule per channel (colours)
    Tuples {
        min_len: usize,
        max_len: usize,
        channels: Vec<NumberRule>,
    },
    /// Exactly two numbers, optionally required to be `min <= max`
    Pair { element: NumberRule, ordered: bool },
    /// A list of numbers sharing one rule (musical scales)
    Numbers {
        min_len: usize,
        max_len: usize,
        element: NumberRule,
    },
    /// A list of strings
    Strings { min_len: usize, max_len: usize },
}

/// The type of a field and its condition
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        /// When false the raw value is coerced to an integer before checking
        allow_float: bool,
    },
    Boolean,
    Enum { values: Vec<String> },
    Array { shape: Option<ArrayShape> },
}

impl FieldType {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number { .. } => "number",
            FieldType::Boolean => "boolean",
            FieldType::Enum { .. } => "enum",
            FieldType::Array { .. } => "array",
        }
    }
}

/// One row of a field specification table
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Dot-separated path, e.g. `visualProperties.colors`
    pub path: String,
    pub field_type: FieldType,
    pub required: bool,
    pub description: Option<String>,
}

impl FieldSpec {
    fn new(path: &str, field_type: FieldType) -> Self {
        Self {
            path: path.to_string(),
            field_type,
            required: true,
            description: None,
        }
    }

    pub fn string(path: &str) -> Self {
        Self::new(path, FieldType::String)
    }

    /// Integer field; the raw value is coerced before the range check
    pub fn integer(path: &str, min: f64, max: f64) -> Self {
        Self::new(
            path,
            FieldType::Number {
                min: Some(min),
                max: Some(max),
                allow_float: false,
            },
        )
    }

    /// Float field; the raw value must already be a JSON number
    pub fn float(path: &str, min: f64, max: f64) -> Self {
        Self::new(
            path,
            FieldType::Number {
                min: Some(min),
                max: Some(max),
                allow_float: true,
            },
        )
    }

    pub fn boolean(path: &str) -> Self {
        Self::new(path, FieldType::Boolean)
    }

    pub fn one_of(path: &str, values: &[&str]) -> Self {
        Self::new(
            path,
            FieldType::Enum {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
        )
    }

    pub fn array(path: &str, shape: ArrayShape) -> Self {
        Self::new(path, FieldType::Array { shape: Some(shape) })
    }

    /// Mark the field optional: absent values are not reported
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// The full field table for one content kind
#[derive(Debug, Clone, PartialEq)]
pub struct KindSchema {
    pub kind: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl KindSchema {
    pub fn new(kind: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            kind: kind.to_string(),
            description: None,
            fields,
        }
    }

    /// Get a field spec by path
    pub fn get_field(&self, path: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.path == path)
    }

    /// Paths of all required fields, in table order
    pub fn required_paths(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.path.as_str())
            .collect()
    }
}

/// TOML file format for schema overrides
#[derive(Debug, Deserialize)]
pub struct SchemaFile {
    pub schema: SchemaDefinition,
}

#[derive(Debug, Deserialize)]
pub struct SchemaDefinition {
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Field definition as it appears in TOML files
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    pub path: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub allow_float: Option<bool>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
    /// Array shape: tuples, pair, numbers or strings
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub min_len: Option<usize>,
    #[serde(default)]
    pub max_len: Option<usize>,
    #[serde(default)]
    pub channels: Option<Vec<NumberRule>>,
    #[serde(default)]
    pub element: Option<NumberRule>,
    #[serde(default)]
    pub ordered: Option<bool>,
}

impl SchemaDefinition {
    pub fn to_kind_schema(self) -> Result<KindSchema> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldDefinition::to_field_spec)
            .collect::<Result<Vec<_>>>()?;
        Ok(KindSchema {
            kind: self.kind,
            description: self.description,
            fields,
        })
    }
}

impl FieldDefinition {
    pub fn to_field_spec(self) -> Result<FieldSpec> {
        let field_type = match self.field_type.as_str() {
            "string" => FieldType::String,
            "number" => FieldType::Number {
                min: self.min,
                max: self.max,
                allow_float: self.allow_float.unwrap_or(false),
            },
            "boolean" | "bool" => FieldType::Boolean,
            "enum" => FieldType::Enum {
                values: self.values.clone().ok_or_else(|| {
                    GardenError::Schema(format!("Field '{}': enum requires 'values'", self.path))
                })?,
            },
            "array" => FieldType::Array {
                shape: self.array_shape()?,
            },
            other => {
                return Err(GardenError::Schema(format!(
                    "Field '{}': unknown type '{}'",
                    self.path, other
                )))
            }
        };

        Ok(FieldSpec {
            path: self.path,
            field_type,
            required: self.required.unwrap_or(true),
            description: self.description,
        })
    }

    fn array_shape(&self) -> Result<Option<ArrayShape>> {
        let min_len = self.min_len.unwrap_or(0);
        let max_len = self.max_len.unwrap_or(usize::MAX);
        let shape = match self.shape.as_deref() {
            None => return Ok(None),
            Some("tuples") => ArrayShape::Tuples {
                min_len,
                max_len,
                channels: self.channels.clone().ok_or_else(|| {
                    GardenError::Schema(format!(
                        "Field '{}': tuples shape requires 'channels'",
                        self.path
                    ))
                })?,
            },
            Some("pair") => ArrayShape::Pair {
                element: self.element.unwrap_or_default(),
                ordered: self.ordered.unwrap_or(true),
            },
            Some("numbers") => ArrayShape::Numbers {
                min_len,
                max_len,
                element: self.element.unwrap_or_default(),
            },
            Some("strings") => ArrayShape::Strings { min_len, max_len },
            Some(other) => {
                return Err(GardenError::Schema(format!(
                    "Field '{}': unknown array shape '{}'",
                    self.path, other
                )))
            }
        };
        Ok(Some(shape))
    }
}
