//! Google Gemini generateContent provider

use crate::config::GardenConfig;
use crate::provider::*;
use garden_core::{GardenError, Result};
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiProvider {
    api_key: String,
    api_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Create a new GeminiProvider from config
    pub fn from_config(config: &GardenConfig) -> Result<Self> {
        let api_key = config
            .api_key("gemini")
            .ok_or_else(|| {
                GardenError::Provider(
                    "Gemini API key not configured. Set GARDEN_GEMINI_API_KEY or add to .garden/config.toml".to_string(),
                )
            })?
            .to_string();

        Ok(Self {
            api_key,
            api_url: config
                .api_url("gemini")
                .unwrap_or(DEFAULT_GEMINI_URL)
                .trim_end_matches('/')
                .to_string(),
            model: config.model("gemini").unwrap_or(DEFAULT_MODEL).to_string(),
            timeout: Duration::from_secs(config.generation.request_timeout_secs),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.api_url, self.model)
    }

    /// Both instructions travel as parts of a single user turn
    fn build_payload(&self, request: &CompletionRequest) -> Value {
        let mut generation_config = json!({});
        if request.json_output {
            generation_config["responseMimeType"] = json!("application/json");
        }
        if let Some(t) = request.temperature {
            generation_config["temperature"] = json!(t);
        }

        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.system }, { "text": request.user }]
            }],
            "generationConfig": generation_config
        })
    }
}

/// Concatenate the text parts of the first candidate
fn response_text(body: &Value) -> Option<String> {
    let parts = body.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
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
            .post(&self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| GardenError::Transport(format!("Gemini request failed: {}", e)))?;

        let body: Value = response.body_mut().read_json().map_err(|e| {
            GardenError::Transport(format!("Failed to read Gemini response: {}", e))
        })?;

        response_text(&body).ok_or_else(|| {
            GardenError::Transport("Gemini response contained no text".to_string())
        })
    }
}
