//! Single-item content generation
//!
//! A generator makes exactly one completion call, decodes the text and
//! validates the result. It never retries and keeps no state between calls.

use crate::decode::decode_completion;
use crate::prompts::Prompt;
use crate::provider::{CompletionProvider, CompletionRequest};
use garden_core::{GardenError, Result};
use garden_schema::{normalize, GardenSpec, KindSchema};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

pub struct Generator<S> {
    provider: Arc<dyn CompletionProvider>,
    prompt: Prompt,
    schema: KindSchema,
    _spec: PhantomData<fn() -> S>,
}

impl<S: GardenSpec> Generator<S> {
    pub fn new(provider: Arc<dyn CompletionProvider>, prompt: Prompt, schema: KindSchema) -> Self {
        Self {
            provider,
            prompt,
            schema,
            _spec: PhantomData,
        }
    }

    /// Generator with the built-in prompt and field table
    pub fn builtin(provider: Arc<dyn CompletionProvider>) -> Self {
        let schema = S::schema();
        let prompt = Prompt::builtin(S::KIND, &schema);
        Self::new(provider, prompt, schema)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    fn request(&self) -> CompletionRequest {
        CompletionRequest {
            kind: S::KIND,
            system: self.prompt.system.clone(),
            user: self.prompt.user.clone(),
            temperature: self.prompt.temperature,
            json_output: true,
        }
    }

    /// Produce one validated spec
    pub fn generate(&self) -> Result<S> {
        let attempt = Uuid::new_v4();
        let kind = S::KIND;
        debug!(%attempt, %kind, provider = self.provider.name(), "requesting completion");

        let text = self.provider.complete(&self.request()).map_err(|e| {
            warn!(%attempt, %kind, error = %e, "completion failed");
            e
        })?;

        self.accept(attempt, &text)
    }

    /// Decode and validate raw completion text
    pub fn accept(&self, attempt: Uuid, text: &str) -> Result<S> {
        let kind = S::KIND;
        let candidate = decode_completion(text).map_err(|e| {
            error!(%attempt, %kind, error = %e, raw = %text, "could not decode completion");
            e
        })?;
        let candidate = Value::Object(candidate);

        match normalize::<S>(&self.schema, candidate.clone()) {
            Ok(spec) => {
                debug!(%attempt, %kind, "generation accepted");
                Ok(spec)
            }
            Err(e) => {
                if let GardenError::ValidationFailed { errors, .. } = &e {
                    error!(
                        %attempt,
                        %kind,
                        count = errors.len(),
                        object = %candidate,
                        "generation rejected: {}",
                        errors.join("; ")
                    );
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{canned_reply, MockProvider};
    use garden_core::ContentKind;
    use garden_schema::{AuroraSpec, PlantSpec, RainbowSpec, WeatherSpec};

    fn mock(replies: Vec<&str>) -> Arc<MockProvider> {
        Arc::new(MockProvider::scripted(
            replies.into_iter().map(str::to_string).collect(),
        ))
    }

    #[test]
    fn test_canned_replies_generate_every_kind() {
        let provider: Arc<dyn CompletionProvider> = Arc::new(MockProvider::new());
        Generator::<PlantSpec>::builtin(provider.clone()).generate().unwrap();
        Generator::<RainbowSpec>::builtin(provider.clone()).generate().unwrap();
        Generator::<WeatherSpec>::builtin(provider.clone()).generate().unwrap();
        Generator::<AuroraSpec>::builtin(provider).generate().unwrap();
    }

    #[test]
    fn test_prose_wrapped_reply() {
        let reply = format!("Here you go!\n```json\n{}\n```", canned_reply(ContentKind::Weather));
        let generator = Generator::<WeatherSpec>::builtin(mock(vec![reply.as_str()]));
        let weather = generator.generate().unwrap();
        assert_eq!(weather.name, "Copper Drizzle");
    }

    #[test]
    fn test_exactly_one_call_on_failure() {
        let provider = mock(vec!["not json at all"]);
        let generator = Generator::<RainbowSpec>::builtin(provider.clone());
        assert!(matches!(generator.generate(), Err(GardenError::Decode(_))));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_validation_failure_embeds_messages() {
        let reply = canned_reply(ContentKind::Aurora)
            .replace("\"waveCount\": 5", "\"waveCount\": 12");
        let generator = Generator::<AuroraSpec>::builtin(mock(vec![reply.as_str()]));
        let err = generator.generate().unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid visualProperties.waveCount: 12 is not between 3 and 8"));
    }

    #[test]
    fn test_transport_failure_passes_through() {
        let provider = Arc::new(MockProvider::failing("timed out"));
        let generator = Generator::<PlantSpec>::builtin(provider);
        assert!(matches!(generator.generate(), Err(GardenError::Transport(_))));
    }

    #[test]
    fn test_plant_coerced_and_defaulted() {
        let reply = r#"{"name": "Fern", "description": "Quiet", "colors": [[120, 50, 50]],
            "petals": "9", "size": [10, 20], "height": [30, 40], "scale": [60, 62.0],
            "oscillator": "square", "layerCount": 2.4, "growthPattern": "spiral", "depthOffset": 5}"#;
        let plant = Generator::<PlantSpec>::builtin(mock(vec![reply])).generate().unwrap();
        assert_eq!(plant.petals, 9);
        assert_eq!(plant.layer_count, 2);
        assert_eq!(plant.scale, vec![60, 62]);
        assert_eq!(plant.maturity_age, 30);
    }

    #[test]
    fn test_request_carries_prompt() {
        let generator = Generator::<PlantSpec>::builtin(Arc::new(MockProvider::new()));
        let request = generator.request();
        assert_eq!(request.kind, ContentKind::Plant);
        assert!(request.json_output);
        assert_eq!(request.temperature, Some(0.8));
        assert!(request.system.contains("- petals: integer between 1 and 40"));
    }
}
