//! OpenAI chat completions provider

use crate::config::GardenConfig;
use crate::provider::*;
use garden_core::{GardenError, Result};
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4.1";

pub struct OpenAiProvider {
    api_key: String,
    api_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Create a new OpenAiProvider from config
    pub fn from_config(config: &GardenConfig) -> Result<Self> {
        let api_key = config
            .api_key("openai")
            .ok_or_else(|| {
                GardenError::Provider(
                    "OpenAI API key not configured. Set GARDEN_OPENAI_API_KEY or add to .garden/config.toml".to_string(),
                )
            })?
            .to_string();

        Ok(Self {
            api_key,
            api_url: config
                .api_url("openai")
                .unwrap_or(DEFAULT_OPENAI_URL)
                .to_string(),
            model: config.model("openai").unwrap_or(DEFAULT_MODEL).to_string(),
            timeout: Duration::from_secs(config.generation.request_timeout_secs),
        })
    }

    fn build_payload(&self, request: &CompletionRequest) -> Value {
        let mut payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ]
        });
        if let Some(t) = request.temperature {
            payload["temperature"] = json!(t);
        }
        if request.json_output {
            payload["response_format"] = json!({ "type": "json_object" });
        }
        payload
    }
}

/// Pull the message text out of a chat completions response
fn response_text(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if self.api_key.is_empty() {
            return Ok(ProviderStatus::NoApiKey);
        }
        Ok(ProviderStatus::Available)
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let payload = self.build_payload(request);
        let agent = build_agent(self.timeout);
        let mut response = agent
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| GardenError::Transport(format!("OpenAI request failed: {}", e)))?;

        let body: Value = response.body_mut().read_json().map_err(|e| {
            GardenError::Transport(format!("Failed to read OpenAI response: {}", e))
        })?;

        response_text(&body).ok_or_else(|| {
            GardenError::Transport("OpenAI response contained no message content".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::ContentKind;

    fn provider() -> OpenAiProvider {
        OpenAiProvider {
            api_key: "sk-test".to_string(),
            api_url: DEFAULT_OPENAI_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_payload_shape() {
        let request = CompletionRequest {
            kind: ContentKind::Plant,
            system: "You are a botanist.".to_string(),
            user: "Grow something.".to_string(),
            temperature: Some(0.8),
            json_output: true,
        };
        let payload = provider().build_payload(&request);
        assert_eq!(payload["model"], "gpt-4.1");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "Grow something.");
        assert_eq!(payload["temperature"], 0.8);
        assert_eq!(payload["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_payload_without_hints() {
        let request = CompletionRequest {
            kind: ContentKind::Plant,
            system: String::new(),
            user: String::new(),
            temperature: None,
            json_output: false,
        };
        let payload = provider().build_payload(&request);
        assert!(payload.get("temperature").is_none());
        assert!(payload.get("response_format").is_none());
    }

    #[test]
    fn test_response_text() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "{\"name\":\"x\"}" } }]
        });
        assert_eq!(response_text(&body).as_deref(), Some("{\"name\":\"x\"}"));
        assert_eq!(response_text(&json!({ "choices": [] })), None);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let mut config = GardenConfig::default();
        config.providers.remove("openai");
        assert!(matches!(
            OpenAiProvider::from_config(&config),
            Err(GardenError::Provider(_))
        ));
    }
}
