//! One-off generation from the command line

use super::load_config;
use anyhow::{Context, Result};
use garden_core::ContentKind;
use garden_gen::GardenService;
use serde_json::json;
use tracing::warn;

pub fn run(
    config_path: Option<&str>,
    kind: &str,
    quantity: Option<i64>,
    provider: Option<&str>,
) -> Result<()> {
    let kind: ContentKind = kind.parse()?;
    let mut config = load_config(config_path)?;
    if let Some(provider) = provider {
        config.set_provider_for_all(provider);
    }
    let service = GardenService::from_config(&config).context("Failed to set up generators")?;

    if kind != ContentKind::Plant && quantity.is_some() {
        warn!(%kind, "--quantity only applies to plants; generating one");
    }

    let output = match kind {
        ContentKind::Plant => {
            let outcome = service.generate_plants(quantity)?;
            for error in &outcome.errors {
                eprintln!("  failed: {}", error);
            }
            json!({ "plants": outcome.items, "total": outcome.total })
        }
        ContentKind::Rainbow => serde_json::to_value(service.generate_rainbow()?)?,
        ContentKind::Weather => serde_json::to_value(service.generate_weather()?)?,
        ContentKind::Aurora => serde_json::to_value(service.generate_aurora()?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
