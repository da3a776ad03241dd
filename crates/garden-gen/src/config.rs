//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `GARDEN_{PROVIDER}_API_KEY`, `PORT`
//! 2. Project-local: `.garden/config.toml`
//! 3. Global: `~/.garden/config.toml`
//!
//! The vendor variables `OPENAI_API_KEY` and `GEMINI_API_KEY` are honoured
//! when no key is configured any other way.

use garden_core::{ContentKind, GardenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: None,
            model: None,
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which provider serves each kind, and how completions are requested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_plant_provider")]
    pub plant_provider: String,
    #[serde(default = "default_gemini")]
    pub rainbow_provider: String,
    #[serde(default = "default_gemini")]
    pub weather_provider: String,
    #[serde(default = "default_gemini")]
    pub aurora_provider: String,
    /// Overrides the per-kind sampling temperature
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            plant_provider: default_plant_provider(),
            rainbow_provider: default_gemini(),
            weather_provider: default_gemini(),
            aurora_provider: default_gemini(),
            temperature: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_plant_provider() -> String {
    "openai".to_string()
}
fn default_gemini() -> String {
    "gemini".to_string()
}
fn default_request_timeout() -> u64 {
    30
}

/// Admission and batching limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_quantity")]
    pub max_quantity: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_batch_cooldown_ms")]
    pub batch_cooldown_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            max_quantity: default_max_quantity(),
            batch_size: default_batch_size(),
            batch_cooldown_ms: default_batch_cooldown_ms(),
        }
    }
}

fn default_max_requests() -> usize {
    50
}
fn default_window_secs() -> u64 {
    60
}
fn default_max_quantity() -> usize {
    10
}
fn default_batch_size() -> usize {
    3
}
fn default_batch_cooldown_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}

/// Replacement prompt text for one kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptOverride {
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GardenConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub prompts: HashMap<String, PromptOverride>,
    #[serde(default)]
    pub schemas_dir: Option<PathBuf>,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct GardenConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
    pub limits: LimitsConfig,
    pub server: ServerConfig,
    pub prompts: HashMap<String, PromptOverride>,
    pub schemas_dir: Option<PathBuf>,
}

impl From<GardenConfigFile> for GardenConfig {
    fn from(file: GardenConfigFile) -> Self {
        Self {
            providers: file.providers,
            generation: file.generation,
            limits: file.limits,
            server: file.server,
            prompts: file.prompts,
            schemas_dir: file.schemas_dir,
        }
    }
}

impl GardenConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut merged = toml::Table::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                Self::merge_into(&mut merged, Self::read_table(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".garden/config.toml");
        if local_path.exists() {
            Self::merge_into(&mut merged, Self::read_table(&local_path)?);
        }

        let mut config = Self::from_table(merged, &local_path)?;
        Self::apply_env_overrides(&mut config);

        Ok(config.into())
    }

    /// Load config from a specific file path only (plus env overrides)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_table(Self::read_table(path)?, path)?;
        Self::apply_env_overrides(&mut config);
        Ok(config.into())
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL for a provider, if overridden
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Get the model name for a provider, if overridden
    pub fn model(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.model.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Get the provider name serving a content kind
    pub fn provider_for(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Plant => &self.generation.plant_provider,
            ContentKind::Rainbow => &self.generation.rainbow_provider,
            ContentKind::Weather => &self.generation.weather_provider,
            ContentKind::Aurora => &self.generation.aurora_provider,
        }
    }

    /// Route every kind to one provider
    pub fn set_provider_for_all(&mut self, name: &str) {
        for kind in ContentKind::ALL {
            let slot = match kind {
                ContentKind::Plant => &mut self.generation.plant_provider,
                ContentKind::Rainbow => &mut self.generation.rainbow_provider,
                ContentKind::Weather => &mut self.generation.weather_provider,
                ContentKind::Aurora => &mut self.generation.aurora_provider,
            };
            *slot = name.to_string();
        }
    }

    /// Prompt overrides for a kind, if any
    pub fn prompt_override(&self, kind: ContentKind) -> Option<&PromptOverride> {
        self.prompts.get(kind.as_str())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".garden").join("config.toml"))
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        content.parse::<toml::Table>().map_err(|e| {
            GardenError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn from_table(table: toml::Table, origin: &Path) -> Result<GardenConfigFile> {
        toml::Value::Table(table).try_into().map_err(|e| {
            GardenError::Config(format!("Invalid config {}: {}", origin.display(), e))
        })
    }

    /// Overlay keys win wherever they are present, including keys set to
    /// their default value. Nested tables merge key by key.
    fn merge_into(base: &mut toml::Table, overlay: toml::Table) {
        for (key, value) in overlay {
            let merged = match (base.remove(&key), value) {
                (Some(toml::Value::Table(mut existing)), toml::Value::Table(incoming)) => {
                    Self::merge_into(&mut existing, incoming);
                    toml::Value::Table(existing)
                }
                (_, value) => value,
            };
            base.insert(key, merged);
        }
    }

    fn apply_env_overrides(config: &mut GardenConfigFile) {
        let provider_keys = [("openai", "OPENAI_API_KEY"), ("gemini", "GEMINI_API_KEY")];
        for (name, vendor_var) in provider_keys {
            let entry = config.providers.entry(name.to_string()).or_default();
            let env_key = format!("GARDEN_{}_API_KEY", name.to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                entry.api_key = Some(key);
            } else if entry.api_key.is_none() {
                entry.api_key = std::env::var(vendor_var).ok();
            }
        }

        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
    }
}
