//! Built-in content kinds
//!
//! Each kind pairs a field specification table with a typed record. The
//! table decides what is accepted; the record is what consumers receive.

mod aurora;
mod plant;
mod rainbow;
mod weather;

pub use aurora::{AuroraSound, AuroraSpec, AuroraVisuals, FlowPattern, AuroraOscillator};
pub use plant::{
    CenterDetail, FlowerType, GrowthPattern, LeafArrangement, LeafPattern, LeafShape3d, Oscillator,
    PetalArrangement, PetalShape, PetalShape3d, PlantSpec, SeasonalBehavior, StemStyle,
    TextureHint,
};
pub use rainbow::{AnimationStyle, RainbowOscillator, RainbowSound, RainbowSpec, RainbowVisuals};
pub use weather::{WeatherImpact, WeatherSpec, WeatherType};

use crate::field::{KindSchema, NumberRule};
use crate::validation::validate_object;
use garden_core::{ContentKind, GardenError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A validated content record produced from model output
pub trait GardenSpec: Serialize + DeserializeOwned + Send + 'static {
    const KIND: ContentKind;

    /// The built-in field table for this kind
    fn schema() -> KindSchema;

    /// Fill in optional fields the model left out. Runs before validation
    /// and must never touch required fields.
    fn apply_defaults(_candidate: &mut Value) {}

    /// Rules that tie one field to another, checked alongside the table.
    /// Runs on the defaulted candidate and only reports on values the table
    /// itself accepts.
    fn dependent_errors(_candidate: &Value) -> Vec<String> {
        Vec::new()
    }
}

/// Default, validate and convert a decoded object into a typed spec
pub fn normalize<S: GardenSpec>(schema: &KindSchema, mut candidate: Value) -> Result<S> {
    S::apply_defaults(&mut candidate);
    let dependent = S::dependent_errors(&candidate);
    let accepted = match validate_object(schema, candidate) {
        Ok(accepted) if dependent.is_empty() => accepted,
        Ok(_) => return Err(failure(schema, dependent)),
        Err(mut errors) => {
            errors.extend(dependent);
            return Err(failure(schema, errors));
        }
    };
    serde_json::from_value(accepted).map_err(|e| GardenError::ValidationFailed {
        kind: S::KIND.to_string(),
        errors: vec![format!("does not match the {} record: {}", S::KIND, e)],
    })
}

fn failure(schema: &KindSchema, errors: Vec<String>) -> GardenError {
    GardenError::ValidationFailed {
        kind: schema.kind.clone(),
        errors,
    }
}

/// The built-in table for a kind
pub fn builtin_schema(kind: ContentKind) -> KindSchema {
    match kind {
        ContentKind::Plant => PlantSpec::schema(),
        ContentKind::Rainbow => RainbowSpec::schema(),
        ContentKind::Weather => WeatherSpec::schema(),
        ContentKind::Aurora => AuroraSpec::schema(),
    }
}

/// Integer RGB channel rules shared by rainbow, aurora and weather colours
pub(crate) fn rgb_channels() -> Vec<NumberRule> {
    vec![NumberRule::int(0.0, 255.0); 3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_schemas_named_by_kind() {
        for kind in ContentKind::ALL {
            assert_eq!(builtin_schema(kind).kind, kind.as_str());
        }
    }

    #[test]
    fn test_normalize_reports_validation_errors() {
        let err = normalize::<WeatherSpec>(&WeatherSpec::schema(), json!({ "name": "Drizzle" }))
            .unwrap_err();
        match err {
            GardenError::ValidationFailed { kind, errors } => {
                assert_eq!(kind, "weather");
                assert!(errors.iter().any(|e| e == "description is missing"));
                assert!(!errors.iter().any(|e| e.starts_with("name")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
