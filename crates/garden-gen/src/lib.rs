//! Garden Gen - AI-backed content generation for the sound garden
//!
//! Provides a pluggable completion provider framework (OpenAI, Gemini, and a
//! scripted mock), prompt construction from the field tables, tolerant
//! decoding of model output, a shared trailing-window rate limiter and the
//! batch orchestrator used for multi-item requests.

pub mod batch;
pub mod config;
pub mod decode;
pub mod generator;
pub mod prompts;
pub mod provider;
pub mod providers;
pub mod rate_limit;
pub mod service;

pub use batch::{BatchOrchestrator, BatchOutcome};
pub use config::{GardenConfig, LimitsConfig, ProviderConfig, ServerConfig};
pub use decode::{decode_completion, extract_braced, parse_strict};
pub use generator::Generator;
pub use prompts::Prompt;
pub use provider::{CompletionProvider, CompletionRequest, ProviderStatus};
pub use providers::{available_providers, create_provider};
pub use rate_limit::{Clock, ManualClock, RateLimiter, SystemClock};
pub use service::GardenService;
