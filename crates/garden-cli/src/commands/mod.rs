//! CLI command implementations

pub mod generate;
pub mod prompt;
pub mod providers;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use garden_gen::GardenConfig;
use garden_schema::SchemaRegistry;
use std::path::Path;

/// Layered config, or a single file when `--config` is given
pub fn load_config(path: Option<&str>) -> Result<GardenConfig> {
    match path {
        Some(path) => GardenConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => GardenConfig::load().context("Failed to load config"),
    }
}

/// Built-in tables plus any overrides under `schemas_dir`
pub fn load_registry(config: &GardenConfig) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::builtin();
    if let Some(dir) = &config.schemas_dir {
        registry
            .load_directory(dir)
            .with_context(|| format!("Failed to load schemas from {}", dir.display()))?;
    }
    Ok(registry)
}
