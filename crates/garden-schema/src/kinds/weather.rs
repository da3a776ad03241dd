//! Weather events

use super::{rgb_channels, GardenSpec};
use crate::field::{ArrayShape, FieldSpec, KindSchema, NumberRule};
use garden_core::{ContentKind, Rgb, Span};
use serde::{Deserialize, Serialize};

pub const WEATHER_TYPES: &[&str] = &["rain", "wind", "sun", "storm", "fog", "rainbow"];
pub const IMPACTS: &[&str] = &["harmful", "beneficial", "neutral"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherType {
    Rain,
    Wind,
    Sun,
    Storm,
    Fog,
    Rainbow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherImpact {
    Harmful,
    Beneficial,
    Neutral,
}

/// A weather event passing over the garden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSpec {
    pub name: String,
    pub description: String,
    /// Seconds
    pub duration: f64,
    pub intensity: f64,
    /// Degrees Celsius
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    #[serde(rename = "type")]
    pub weather_type: WeatherType,
    pub impact: WeatherImpact,
    pub colors: Vec<Rgb>,
    pub particle_count: Span<u32>,
    pub base_frequency: f64,
    pub volume: f64,
    pub reverb: f64,
}

impl GardenSpec for WeatherSpec {
    const KIND: ContentKind = ContentKind::Weather;

    fn schema() -> KindSchema {
        KindSchema::new(
            "weather",
            vec![
                FieldSpec::string("name"),
                FieldSpec::string("description"),
                FieldSpec::float("duration", 10.0, 60.0),
                FieldSpec::float("intensity", 0.1, 1.0),
                FieldSpec::float("temperature", 0.0, 40.0),
                FieldSpec::float("humidity", 0.0, 100.0),
                FieldSpec::float("windSpeed", 0.0, 50.0),
                FieldSpec::one_of("type", WEATHER_TYPES),
                FieldSpec::one_of("impact", IMPACTS),
                FieldSpec::array(
                    "colors",
                    ArrayShape::Tuples {
                        min_len: 1,
                        max_len: 3,
                        channels: rgb_channels(),
                    },
                ),
                FieldSpec::array(
                    "particleCount",
                    ArrayShape::Pair {
                        element: NumberRule::non_negative_int(),
                        ordered: true,
                    },
                ),
                FieldSpec::float("baseFrequency", 100.0, 1000.0),
                FieldSpec::float("volume", 0.1, 1.0),
                FieldSpec::float("reverb", 0.0, 0.9),
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

    fn sample_weather() -> Value {
        json!({
            "name": "Copper Drizzle",
            "description": "Warm rain that makes the bells ring softer",
            "duration": 25,
            "intensity": 0.4,
            "temperature": 18.5,
            "humidity": 80,
            "windSpeed": 6,
            "type": "rain",
            "impact": "beneficial",
            "colors": [[120, 140, 200]],
            "particleCount": [100, 400],
            "baseFrequency": 330,
            "volume": 0.5,
            "reverb": 0.3
        })
    }

    #[test]
    fn test_valid_weather() {
        let weather: WeatherSpec = normalize(&WeatherSpec::schema(), sample_weather()).unwrap();
        assert_eq!(weather.weather_type, WeatherType::Rain);
        assert_eq!(weather.particle_count, Span([100, 400]));
        assert_eq!(weather.temperature, 18.5);
    }

    #[test]
    fn test_particle_count_order() {
        let mut weather = sample_weather();
        weather["particleCount"] = json!([400, 100]);
        let errors = validate_object(&WeatherSpec::schema(), weather).unwrap_err();
        assert_eq!(
            errors,
            vec!["Invalid particleCount: min 400 is greater than max 100"]
        );
    }

    #[test]
    fn test_negative_particle_count() {
        let mut weather = sample_weather();
        weather["particleCount"] = json!([-5, 100]);
        let errors = validate_object(&WeatherSpec::schema(), weather).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at least 0"));
    }

    #[test]
    fn test_serializes_type_field() {
        let weather: WeatherSpec = normalize(&WeatherSpec::schema(), sample_weather()).unwrap();
        let value = serde_json::to_value(&weather).unwrap();
        assert_eq!(value["type"], json!("rain"));
        assert_eq!(value["windSpeed"], json!(6.0));
    }

    #[test]
    fn test_every_enum_value_deserializes() {
        for value in WEATHER_TYPES {
            serde_json::from_value::<WeatherType>(json!(value)).unwrap();
        }
        for value in IMPACTS {
            serde_json::from_value::<WeatherImpact>(json!(value)).unwrap();
        }
    }
}
