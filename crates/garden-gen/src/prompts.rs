//! Prompt pairs sent to the completion provider
//!
//! The system prompt ends with a field guide rendered from the kind's field
//! table, so the model is asked for exactly what the validator accepts.
//! Either half can be replaced from `[prompts.<kind>]` in config.

use crate::config::GardenConfig;
use garden_core::ContentKind;
use garden_schema::{ArrayShape, FieldSpec, FieldType, KindSchema, NumberRule};

/// A system/user instruction pair plus sampling temperature
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub temperature: Option<f64>,
}

impl Prompt {
    /// Built-in prompt for a kind, with the field guide taken from `schema`
    pub fn builtin(kind: ContentKind, schema: &KindSchema) -> Self {
        let (persona, user, temperature) = match kind {
            ContentKind::Plant => (PLANT_PERSONA, PLANT_REQUEST, Some(0.8)),
            ContentKind::Rainbow => (RAINBOW_PERSONA, RAINBOW_REQUEST, None),
            ContentKind::Weather => (WEATHER_PERSONA, WEATHER_REQUEST, None),
            ContentKind::Aurora => (AURORA_PERSONA, AURORA_REQUEST, None),
        };

        Self {
            system: format!(
                "{}\n\nRespond with ONLY a valid JSON object, with no text or comments \
                 outside it. Nested fields are written with dots below but must be \
                 nested objects in the JSON.\n\nFields:\n{}",
                persona,
                field_guide(schema)
            ),
            user: user.to_string(),
            temperature,
        }
    }

    /// Built-in prompt with config overrides applied
    pub fn for_kind(kind: ContentKind, schema: &KindSchema, config: &GardenConfig) -> Self {
        let mut prompt = Self::builtin(kind, schema);
        if let Some(overrides) = config.prompt_override(kind) {
            if let Some(system) = &overrides.system {
                prompt.system = system.clone();
            }
            if let Some(user) = &overrides.user {
                prompt.user = user.clone();
            }
        }
        if config.generation.temperature.is_some() {
            prompt.temperature = config.generation.temperature;
        }
        prompt
    }
}

/// One line per field, in table order
pub fn field_guide(schema: &KindSchema) -> String {
    schema
        .fields
        .iter()
        .map(describe_field)
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_field(spec: &FieldSpec) -> String {
    let mut line = format!("- {}: {}", spec.path, describe_type(&spec.field_type));
    if let Some(description) = &spec.description {
        line.push_str(&format!(" ({})", description));
    }
    if !spec.required {
        line.push_str(", optional");
    }
    line
}

fn describe_type(field_type: &FieldType) -> String {
    match field_type {
        FieldType::String => "non-empty string".to_string(),
        FieldType::Boolean => "true or false".to_string(),
        FieldType::Enum { values } => format!("one of {}", quoted(values)),
        FieldType::Number {
            min,
            max,
            allow_float,
        } => describe_rule(&NumberRule {
            min: *min,
            max: *max,
            integer: !allow_float,
        }),
        FieldType::Array { shape: None } => "array".to_string(),
        FieldType::Array { shape: Some(shape) } => describe_shape(shape),
    }
}

fn describe_rule(rule: &NumberRule) -> String {
    let noun = if rule.integer { "integer" } else { "number" };
    format!("{} {}", noun, rule.describe())
}

fn describe_shape(shape: &ArrayShape) -> String {
    match shape {
        ArrayShape::Tuples {
            min_len,
            max_len,
            channels,
        } => format!(
            "array of {} triples [{}]",
            describe_len(*min_len, *max_len),
            channels
                .iter()
                .map(describe_rule)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        ArrayShape::Pair { element, ordered } => {
            let mut text = format!("[min, max] pair, each a {}", describe_rule(element));
            if *ordered {
                text.push_str(", min <= max");
            }
            text
        }
        ArrayShape::Numbers {
            min_len,
            max_len,
            element,
        } => format!(
            "array of {} values, each a {}",
            describe_len(*min_len, *max_len),
            describe_rule(element)
        ),
        ArrayShape::Strings { min_len, max_len } => {
            format!("array of {} strings", describe_len(*min_len, *max_len))
        }
    }
}

fn describe_len(min: usize, max: usize) -> String {
    if max == usize::MAX {
        format!("at least {}", min)
    } else if min == max {
        min.to_string()
    } else {
        format!("{}-{}", min, max)
    }
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

const PLANT_PERSONA: &str = "You are a botanical AI that invents garden flower species with musical voices, \
inspired by delphiniums, foxgloves, zinnias, daisies and pansies. Colours are HSB triples: \
hue 0-360, saturation 0-100, brightness 0-100. The scale is a list of MIDI note numbers.";

const PLANT_REQUEST: &str = "Generate one large, spectacular garden flower. Use 3-5 colours, a size \
range between 30 and 150, a height range between 50 and 300 and 4-7 MIDI notes between 48 and 84. \
Write every numeric array as a JSON array of numbers, never as a string.";

const RAINBOW_PERSONA: &str = "You are a cosmic AI that designs psychedelic rainbows paired with \
harmonic soundscapes. Colours are RGB triples of integers 0-255.";

const RAINBOW_REQUEST: &str = "Generate one awe-inspiring rainbow with 5-7 vibrant, contrasting \
colours, a captivating animation and an ethereal, reverberant soundscape. Keep every value in \
range and use integers where integers are required.";

const WEATHER_PERSONA: &str = "You are a weather AI that creates short weather events passing over \
a musical garden and affecting its plants. Colours are RGB triples of integers 0-255.";

const WEATHER_REQUEST: &str =
    "Generate one weather event that is visually striking and has a clear effect on the garden.";

const AURORA_PERSONA: &str = "You are a mystical AI that designs aurora borealis displays with deep, \
atmospheric harmonic sound. Colours are RGB triples of integers 0-255, favouring greens, blues, \
purples and magentas with occasional warm accents.";

const AURORA_REQUEST: &str = "Generate one mesmerizing aurora with 5-7 colours and flowing, organic \
movement. The sound should feel vast and mystical. Keep every value in range and use integers \
where integers are required.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptOverride;
    use garden_schema::builtin_schema;

    #[test]
    fn test_field_guide_lists_every_field() {
        let schema = builtin_schema(ContentKind::Rainbow);
        let guide = field_guide(&schema);
        assert_eq!(guide.lines().count(), schema.fields.len());
        assert!(guide.contains("- visualProperties.arcCount: integer between 3 and 7"));
        assert!(guide.contains(
            "- soundProperties.oscillatorType: one of 'sine', 'triangle', 'sawtooth', 'pulse'"
        ));
        assert!(guide.contains("array of 3-7 triples [integer between 0 and 255"));
    }

    #[test]
    fn test_plant_guide_marks_optional_fields() {
        let guide = field_guide(&builtin_schema(ContentKind::Plant));
        assert!(guide
            .contains("- size: [min, max] pair, each a number between 5 and 150, min <= max"));
        assert!(guide.contains("- stemRadius: number between 1 and 10, optional"));
    }

    #[test]
    fn test_builtin_plant_temperature() {
        let schema = builtin_schema(ContentKind::Plant);
        assert_eq!(Prompt::builtin(ContentKind::Plant, &schema).temperature, Some(0.8));
        assert_eq!(
            Prompt::builtin(ContentKind::Aurora, &builtin_schema(ContentKind::Aurora)).temperature,
            None
        );
    }

    #[test]
    fn test_config_overrides() {
        let mut config = GardenConfig::default();
        config.prompts.insert(
            "weather".to_string(),
            PromptOverride {
                system: None,
                user: Some("Make it foggy.".to_string()),
            },
        );
        config.generation.temperature = Some(0.3);

        let schema = builtin_schema(ContentKind::Weather);
        let prompt = Prompt::for_kind(ContentKind::Weather, &schema, &config);
        assert_eq!(prompt.user, "Make it foggy.");
        assert!(prompt.system.starts_with(WEATHER_PERSONA));
        assert_eq!(prompt.temperature, Some(0.3));
    }
}
