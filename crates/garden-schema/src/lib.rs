//! Garden Schema - Field tables and validation for generated content
//!
//! This crate turns an untrusted decoded JSON object into a typed,
//! bounds-checked record. One generic engine is driven by a per-kind
//! field specification table; adding a kind means adding a table.

mod field;
pub mod kinds;
pub mod path;
mod registry;
mod validation;

pub use field::{
    ArrayShape, FieldDefinition, FieldSpec, FieldType, KindSchema, NumberRule, SchemaDefinition,
    SchemaFile,
};
pub use kinds::{
    builtin_schema, normalize, AuroraSpec, GardenSpec, PlantSpec, RainbowSpec, WeatherSpec,
};
pub use registry::SchemaRegistry;
pub use validation::{
    coerce_integer, validate_field, validate_object, FieldOutcome, ValidationResult,
};
