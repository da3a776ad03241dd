//! List completion providers and their health

use super::load_config;
use anyhow::Result;
use garden_core::ContentKind;
use garden_gen::{available_providers, create_provider, ProviderStatus};

pub fn run(config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;

    println!("Providers:");
    for name in available_providers() {
        let status = match create_provider(name, &config).and_then(|p| p.health_check()) {
            Ok(ProviderStatus::Available) => "available".to_string(),
            Ok(ProviderStatus::NoApiKey) => "no API key".to_string(),
            Err(_) if config.is_enabled(name) && config.api_key(name).is_none() => {
                "no API key".to_string()
            }
            Ok(ProviderStatus::Unavailable(reason)) => format!("unavailable ({})", reason),
            Err(e) => format!("error ({})", e),
        };
        let kinds: Vec<&str> = ContentKind::ALL
            .iter()
            .filter(|k| config.provider_for(**k) == name)
            .map(|k| k.as_str())
            .collect();

        if kinds.is_empty() {
            println!("  {:<8} {}", name, status);
        } else {
            println!("  {:<8} {}  [{}]", name, status, kinds.join(", "));
        }
    }
    Ok(())
}
