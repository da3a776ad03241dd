//! Auroras

use super::{rgb_channels, GardenSpec};
use crate::field::{ArrayShape, FieldSpec, KindSchema};
use garden_core::{ContentKind, Rgb};
use serde::{Deserialize, Serialize};

pub const FLOW_PATTERNS: &[&str] = &[
    "flowing_waves",
    "dancing_curtains",
    "rippling_sheets",
    "spiral_vortex",
    "breathing_veils",
];
pub const OSCILLATOR_TYPES: &[&str] = &["sine", "triangle", "custom_aurora"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPattern {
    FlowingWaves,
    DancingCurtains,
    RipplingSheets,
    SpiralVortex,
    BreathingVeils,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuroraOscillator {
    Sine,
    Triangle,
    CustomAurora,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuroraVisuals {
    pub colors: Vec<Rgb>,
    pub wave_count: u8,
    pub wave_height: f64,
    pub flow_pattern: FlowPattern,
    pub intensity: f64,
    pub shimmer_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuroraSound {
    pub soundscape_name: String,
    pub base_frequency: f64,
    pub harmonic_complexity: f64,
    pub oscillator_type: AuroraOscillator,
    pub duration_seconds: u32,
    pub spatial_effect: f64,
    pub atmospheric_reverb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuroraSpec {
    pub name: String,
    pub description: String,
    pub visual_properties: AuroraVisuals,
    pub sound_properties: AuroraSound,
}

impl GardenSpec for AuroraSpec {
    const KIND: ContentKind = ContentKind::Aurora;

    fn schema() -> KindSchema {
        KindSchema::new(
            "aurora",
            vec![
                FieldSpec::string("name"),
                FieldSpec::string("description"),
                FieldSpec::array(
                    "visualProperties.colors",
                    ArrayShape::Tuples {
                        min_len: 4,
                        max_len: 8,
                        channels: rgb_channels(),
                    },
                ),
                FieldSpec::integer("visualProperties.waveCount", 3.0, 8.0),
                FieldSpec::float("visualProperties.waveHeight", 0.3, 0.8),
                FieldSpec::one_of("visualProperties.flowPattern", FLOW_PATTERNS),
                FieldSpec::float("visualProperties.intensity", 0.4, 1.0),
                FieldSpec::float("visualProperties.shimmerSpeed", 0.5, 3.0),
                FieldSpec::string("soundProperties.soundscapeName"),
                FieldSpec::float("soundProperties.baseFrequency", 80.0, 300.0),
                FieldSpec::float("soundProperties.harmonicComplexity", 1.2, 4.0),
                FieldSpec::one_of("soundProperties.oscillatorType", OSCILLATOR_TYPES),
                FieldSpec::integer("soundProperties.durationSeconds", 20.0, 90.0),
                FieldSpec::float("soundProperties.spatialEffect", 0.3, 0.9),
                FieldSpec::float("soundProperties.atmosphericReverb", 0.4, 0.9),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::normalize;
    use crate::validation::validate_object;
    use serde_json::{json, Value};

    fn sample_aurora() -> Value {
        json!({
            "name": "Celestial Whispers",
            "description": "Green curtains folding over the ridge",
            "visualProperties": {
                "colors": [[0, 255, 100], [0, 150, 255], [150, 0, 255], [255, 0, 200], [255, 200, 0]],
                "waveCount": 5,
                "waveHeight": 0.6,
                "flowPattern": "dancing_curtains",
                "intensity": 0.9,
                "shimmerSpeed": 1.4
            },
            "soundProperties": {
                "soundscapeName": "Polar Drone",
                "baseFrequency": 110.5,
                "harmonicComplexity": 2.5,
                "oscillatorType": "custom_aurora",
                "durationSeconds": 45,
                "spatialEffect": 0.7,
                "atmosphericReverb": 0.8
            }
        })
    }

    #[test]
    fn test_valid_aurora() {
        let aurora: AuroraSpec = normalize(&AuroraSpec::schema(), sample_aurora()).unwrap();
        assert_eq!(aurora.visual_properties.colors.len(), 5);
        assert_eq!(
            aurora.sound_properties.oscillator_type,
            AuroraOscillator::CustomAurora
        );
    }

    #[test]
    fn test_too_few_colors() {
        let mut aurora = sample_aurora();
        aurora["visualProperties"]["colors"] = json!([[0, 255, 100], [0, 150, 255]]);
        let errors = validate_object(&AuroraSpec::schema(), aurora).unwrap_err();
        assert_eq!(
            errors,
            vec!["Invalid visualProperties.colors: expected 4-8 entries, got 2"]
        );
    }

    #[test]
    fn test_sawtooth_not_an_aurora_oscillator() {
        let mut aurora = sample_aurora();
        aurora["soundProperties"]["oscillatorType"] = json!("sawtooth");
        aurora["visualProperties"]["shimmerSpeed"] = json!(3.5);
        let errors = validate_object(&AuroraSpec::schema(), aurora).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("shimmerSpeed"));
        assert!(errors[1].contains("custom_aurora"));
    }

    #[test]
    fn test_every_enum_value_deserializes() {
        for value in FLOW_PATTERNS {
            serde_json::from_value::<FlowPattern>(json!(value)).unwrap();
        }
        for value in OSCILLATOR_TYPES {
            serde_json::from_value::<AuroraOscillator>(json!(value)).unwrap();
        }
    }
}
