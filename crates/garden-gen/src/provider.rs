//! Completion provider trait and request types

use garden_core::{ContentKind, Result};
use std::time::Duration;

/// One completion call: a system and user instruction pair
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The kind being generated (used by offline providers)
    pub kind: ContentKind,
    pub system: String,
    pub user: String,
    pub temperature: Option<f64>,
    /// Ask the service for JSON-formatted output where supported
    pub json_output: bool,
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    Unavailable(String),
    NoApiKey,
}

/// Trait implemented by each completion provider (OpenAI, Gemini, Mock)
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g. "openai", "gemini", "mock")
    fn name(&self) -> &str;

    /// Check if the provider is usable (API key set)
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Run one completion and return the raw response text.
    /// Transport failures are reported as `GardenError::Transport`.
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// HTTP agent with a global timeout per call. No retries.
pub(crate) fn build_agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    config.into()
}
