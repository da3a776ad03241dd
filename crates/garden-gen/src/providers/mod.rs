//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod gemini;
pub mod mock;
pub mod openai;

use crate::config::GardenConfig;
use crate::provider::CompletionProvider;
use garden_core::{GardenError, Result};
use std::sync::Arc;

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &GardenConfig) -> Result<Arc<dyn CompletionProvider>> {
    if !config.is_enabled(name) {
        return Err(GardenError::Provider(format!(
            "Provider '{}' is disabled in config",
            name
        )));
    }
    match name {
        "mock" => Ok(Arc::new(mock::MockProvider::new())),
        "openai" => Ok(Arc::new(openai::OpenAiProvider::from_config(config)?)),
        "gemini" => Ok(Arc::new(gemini::GeminiProvider::from_config(config)?)),
        _ => Err(GardenError::Provider(format!(
            "Unknown provider '{}'. Available: {}",
            name,
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["mock", "openai", "gemini"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn test_create_mock() {
        let provider = create_provider("mock", &GardenConfig::default()).unwrap();
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn test_unknown_provider() {
        let err = create_provider("anthropic", &GardenConfig::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("Available: mock, openai, gemini"));
    }

    #[test]
    fn test_disabled_provider() {
        let mut config = GardenConfig::default();
        config.providers.insert(
            "gemini".to_string(),
            ProviderConfig {
                api_key: Some("key".to_string()),
                enabled: false,
                ..Default::default()
            },
        );
        assert!(create_provider("gemini", &config).is_err());
    }

    #[test]
    fn test_configured_gemini() {
        let mut config = GardenConfig::default();
        config.providers.insert(
            "gemini".to_string(),
            ProviderConfig {
                api_key: Some("key".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(create_provider("gemini", &config).unwrap().name(), "gemini");
    }
}
