//! Rainbows

use super::{rgb_channels, GardenSpec};
use crate::field::{ArrayShape, FieldSpec, KindSchema};
use garden_core::{ContentKind, Rgb};
use serde::{Deserialize, Serialize};

pub const ANIMATION_STYLES: &[&str] = &["pulsating", "shimmering", "breathing", "drifting_waves"];
pub const OSCILLATOR_TYPES: &[&str] = &["sine", "triangle", "sawtooth", "pulse"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    Pulsating,
    Shimmering,
    Breathing,
    DriftingWaves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainbowOscillator {
    Sine,
    Triangle,
    Sawtooth,
    Pulse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainbowVisuals {
    pub colors: Vec<Rgb>,
    pub arc_count: u8,
    pub arc_thickness: f64,
    pub animation_style: AnimationStyle,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainbowSound {
    pub soundscape_name: String,
    pub base_frequency: f64,
    pub harmonicity_ratio: f64,
    pub oscillator_type: RainbowOscillator,
    pub duration_seconds: u32,
    pub reverb_mix: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainbowSpec {
    pub name: String,
    pub description: String,
    pub visual_properties: RainbowVisuals,
    pub sound_properties: RainbowSound,
}

impl GardenSpec for RainbowSpec {
    const KIND: ContentKind = ContentKind::Rainbow;

    fn schema() -> KindSchema {
        KindSchema::new(
            "rainbow",
            vec![
                FieldSpec::string("name"),
                FieldSpec::string("description"),
                FieldSpec::array(
                    "visualProperties.colors",
                    ArrayShape::Tuples {
                        min_len: 3,
                        max_len: 7,
                        channels: rgb_channels(),
                    },
                ),
                FieldSpec::integer("visualProperties.arcCount", 3.0, 7.0),
                FieldSpec::float("visualProperties.arcThickness", 5.0, 20.0),
                FieldSpec::one_of("visualProperties.animationStyle", ANIMATION_STYLES),
                FieldSpec::float("visualProperties.intensity", 0.5, 1.0),
                FieldSpec::string("soundProperties.soundscapeName"),
                FieldSpec::float("soundProperties.baseFrequency", 100.0, 400.0),
                FieldSpec::float("soundProperties.harmonicityRatio", 1.0, 3.0),
                FieldSpec::one_of("soundProperties.oscillatorType", OSCILLATOR_TYPES),
                FieldSpec::integer("soundProperties.durationSeconds", 10.0, 60.0),
                FieldSpec::float("soundProperties.reverbMix", 0.1, 0.8),
            ],
        )
    }
}
