//! Validate a saved model response

use super::{load_config, load_registry};
use anyhow::{bail, Context, Result};
use garden_core::{ContentKind, GardenError};
use garden_gen::decode_completion;
use garden_schema::{AuroraSpec, PlantSpec, RainbowSpec, SchemaRegistry, WeatherSpec};
use serde_json::Value;

pub fn run(config_path: Option<&str>, kind: &str, file: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = load_registry(&config)?;

    let text = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?;
    let candidate = Value::Object(decode_completion(&text)?);

    match check(&registry, kind, candidate) {
        Ok(normalized) => {
            println!("{}", serde_json::to_string_pretty(&normalized)?);
            Ok(())
        }
        Err(GardenError::ValidationFailed { kind, errors }) => {
            println!("{} error(s) in {} data:", errors.len(), kind);
            for error in &errors {
                println!("  - {}", error);
            }
            bail!("validation failed")
        }
        Err(e) => Err(e.into()),
    }
}

/// Built-in kinds are typed after validation; table-only kinds stay JSON
fn check(registry: &SchemaRegistry, kind: &str, candidate: Value) -> garden_core::Result<Value> {
    let typed = match kind.parse::<ContentKind>() {
        Ok(ContentKind::Plant) => serde_json::to_value(registry.normalize::<PlantSpec>(candidate)?),
        Ok(ContentKind::Rainbow) => {
            serde_json::to_value(registry.normalize::<RainbowSpec>(candidate)?)
        }
        Ok(ContentKind::Weather) => {
            serde_json::to_value(registry.normalize::<WeatherSpec>(candidate)?)
        }
        Ok(ContentKind::Aurora) => {
            serde_json::to_value(registry.normalize::<AuroraSpec>(candidate)?)
        }
        Err(_) => return registry.validate(kind, candidate),
    };
    Ok(typed?)
}
