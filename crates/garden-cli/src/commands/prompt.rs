//! Print the prompt pair for a kind

use super::{load_config, load_registry};
use anyhow::Result;
use garden_core::ContentKind;
use garden_gen::Prompt;
use garden_schema::builtin_schema;

pub fn run(config_path: Option<&str>, kind: &str) -> Result<()> {
    let kind: ContentKind = kind.parse()?;
    let config = load_config(config_path)?;
    let registry = load_registry(&config)?;

    let schema = registry
        .get(kind.as_str())
        .cloned()
        .unwrap_or_else(|| builtin_schema(kind));
    let prompt = Prompt::for_kind(kind, &schema, &config);

    println!("# provider: {}", config.provider_for(kind));
    if let Some(temperature) = prompt.temperature {
        println!("# temperature: {}", temperature);
    }
    println!("\n## system\n{}", prompt.system);
    println!("\n## user\n{}", prompt.user);
    Ok(())
}
