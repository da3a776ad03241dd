//! Service facade wiring admission, orchestration and generators together

use crate::batch::{BatchOrchestrator, BatchOutcome};
use crate::config::GardenConfig;
use crate::generator::Generator;
use crate::prompts::Prompt;
use crate::provider::CompletionProvider;
use crate::providers::create_provider;
use crate::rate_limit::RateLimiter;
use garden_core::{ContentKind, GardenError, Result};
use garden_schema::{AuroraSpec, GardenSpec, PlantSpec, RainbowSpec, SchemaRegistry, WeatherSpec};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Every generation endpoint goes through one `GardenService`. The rate
/// limiter is consulted once per call, before any generation work starts.
pub struct GardenService {
    limiter: RateLimiter,
    orchestrator: BatchOrchestrator,
    plant: Generator<PlantSpec>,
    rainbow: Generator<RainbowSpec>,
    weather: Generator<WeatherSpec>,
    aurora: Generator<AuroraSpec>,
}

impl GardenService {
    pub fn new(
        limiter: RateLimiter,
        orchestrator: BatchOrchestrator,
        plant: Generator<PlantSpec>,
        rainbow: Generator<RainbowSpec>,
        weather: Generator<WeatherSpec>,
        aurora: Generator<AuroraSpec>,
    ) -> Self {
        Self {
            limiter,
            orchestrator,
            plant,
            rainbow,
            weather,
            aurora,
        }
    }

    /// One provider for every kind, built-in prompts and tables
    pub fn with_provider(
        provider: Arc<dyn CompletionProvider>,
        limiter: RateLimiter,
        orchestrator: BatchOrchestrator,
    ) -> Self {
        Self::new(
            limiter,
            orchestrator,
            Generator::builtin(provider.clone()),
            Generator::builtin(provider.clone()),
            Generator::builtin(provider.clone()),
            Generator::builtin(provider),
        )
    }

    /// Build providers, prompts, tables and limits from configuration
    pub fn from_config(config: &GardenConfig) -> Result<Self> {
        let mut registry = SchemaRegistry::builtin();
        if let Some(dir) = &config.schemas_dir {
            registry.load_directory(dir)?;
            info!(dir = %dir.display(), "loaded schema overrides");
        }

        let mut providers: HashMap<String, Arc<dyn CompletionProvider>> = HashMap::new();
        for kind in ContentKind::ALL {
            let name = config.provider_for(kind);
            if !providers.contains_key(name) {
                providers.insert(name.to_string(), create_provider(name, config)?);
            }
        }

        let limits = &config.limits;
        let window = Duration::from_secs(limits.window_secs);
        let limiter = RateLimiter::new(limits.max_requests, window);

        Ok(Self::new(
            limiter,
            BatchOrchestrator::from_limits(limits),
            build_generator(config, &registry, &providers)?,
            build_generator(config, &registry, &providers)?,
            build_generator(config, &registry, &providers)?,
            build_generator(config, &registry, &providers)?,
        ))
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn orchestrator(&self) -> &BatchOrchestrator {
        &self.orchestrator
    }

    /// Provider name serving each kind
    pub fn provider_names(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("plant", self.plant.provider_name().to_string()),
            ("rainbow", self.rainbow.provider_name().to_string()),
            ("weather", self.weather.provider_name().to_string()),
            ("aurora", self.aurora.provider_name().to_string()),
        ])
    }

    /// The prompt pair sent for a kind
    pub fn prompt(&self, kind: ContentKind) -> &Prompt {
        match kind {
            ContentKind::Plant => self.plant.prompt(),
            ContentKind::Rainbow => self.rainbow.prompt(),
            ContentKind::Weather => self.weather.prompt(),
            ContentKind::Aurora => self.aurora.prompt(),
        }
    }

    /// Generate up to `max_quantity` plants; `requested` is clamped
    pub fn generate_plants(&self, requested: Option<i64>) -> Result<BatchOutcome<PlantSpec>> {
        self.limiter.admit()?;
        let quantity = self.orchestrator.clamp_quantity(requested);
        info!(kind = "plant", quantity, "generation request admitted");
        self.orchestrator.run(quantity, || self.plant.generate())
    }

    pub fn generate_rainbow(&self) -> Result<RainbowSpec> {
        self.admit_single(ContentKind::Rainbow)?;
        self.rainbow.generate()
    }

    pub fn generate_weather(&self) -> Result<WeatherSpec> {
        self.admit_single(ContentKind::Weather)?;
        self.weather.generate()
    }

    pub fn generate_aurora(&self) -> Result<AuroraSpec> {
        self.admit_single(ContentKind::Aurora)?;
        self.aurora.generate()
    }

    fn admit_single(&self, kind: ContentKind) -> Result<()> {
        self.limiter.admit()?;
        info!(%kind, "generation request admitted");
        Ok(())
    }
}

fn build_generator<S: GardenSpec>(
    config: &GardenConfig,
    registry: &SchemaRegistry,
    providers: &HashMap<String, Arc<dyn CompletionProvider>>,
) -> Result<Generator<S>> {
    let kind = S::KIND;
    let schema = registry
        .get(kind.as_str())
        .cloned()
        .unwrap_or_else(S::schema);
    let prompt = Prompt::for_kind(kind, &schema, config);
    let provider = providers
        .get(config.provider_for(kind))
        .cloned()
        .ok_or_else(|| GardenError::Provider(format!("No provider configured for {}", kind)))?;
    Ok(Generator::new(provider, prompt, schema))
}
