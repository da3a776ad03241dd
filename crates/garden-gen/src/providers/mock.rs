//! Mock provider for offline development and testing
//!
//! Replies with a canned, valid object for the requested kind, or with a
//! scripted sequence of raw responses, without any network calls.

use crate::provider::*;
use garden_core::{ContentKind, GardenError, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A provider that answers locally
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<String>>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with these texts in order, then fall back to canned replies
    pub fn scripted(replies: Vec<String>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// Fail every call with a transport error
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Number of completions requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(GardenError::Transport(message.clone()));
        }

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        Ok(scripted.unwrap_or_else(|| canned_reply(request.kind).to_string()))
    }
}

/// A valid response body for each kind
pub fn canned_reply(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Plant => PLANT_REPLY,
        ContentKind::Rainbow => RAINBOW_REPLY,
        ContentKind::Weather => WEATHER_REPLY,
        ContentKind::Aurora => AURORA_REPLY,
    }
}

const PLANT_REPLY: &str = r#"{
  "name": "Moonlit Foxbell",
  "description": "A tall spire of bells that chime a minor triad at dusk",
  "colors": [[280, 60, 85], [320, 70, 90], [45, 80, 95]],
  "petals": 18,
  "size": [40, 110],
  "height": [120, 260],
  "scale": [57, 60, 64, 69, 72],
  "oscillator": "triangle",
  "layerCount": 3,
  "growthPattern": "cascading",
  "depthOffset": 35,
  "stemStyle": "segmented",
  "stemRadius": 4,
  "petalShape": "bell_shaped",
  "leafPattern": "alternate",
  "flowerType": "spike",
  "seasonalBehavior": "perennial",
  "pollinatorAttractant": true,
  "lifespan": 240,
  "maturityAge": 45,
  "growthRate": 1.1,
  "decayRate": 0.4,
  "resilience": 7
}"#;

const RAINBOW_REPLY: &str = r#"{
  "name": "Prism Choir",
  "description": "Soft bands that breathe in and out with a slow chord",
  "visualProperties": {
    "colors": [[255, 80, 80], [255, 200, 60], [120, 220, 120], [80, 140, 255], [170, 90, 255]],
    "arcCount": 5,
    "arcThickness": 11.5,
    "animationStyle": "breathing",
    "intensity": 0.85
  },
  "soundProperties": {
    "soundscapeName": "Spectral Hum",
    "baseFrequency": 196.0,
    "harmonicityRatio": 1.5,
    "oscillatorType": "sine",
    "durationSeconds": 35,
    "reverbMix": 0.45
  }
}"#;

const WEATHER_REPLY: &str = r#"{
  "name": "Copper Drizzle",
  "description": "Warm rain that softens every bell in the garden",
  "duration": 30,
  "intensity": 0.45,
  "temperature": 19,
  "humidity": 82,
  "windSpeed": 7.5,
  "type": "rain",
  "impact": "beneficial",
  "colors": [[120, 140, 200], [90, 110, 170]],
  "particleCount": [150, 450],
  "baseFrequency": 330,
  "volume": 0.5,
  "reverb": 0.35
}"#;

const AURORA_REPLY: &str = r#"{
  "name": "Celestial Whispers",
  "description": "Green curtains folding slowly over the northern ridge",
  "visualProperties": {
    "colors": [[0, 255, 100], [50, 200, 80], [0, 150, 255], [150, 0, 255], [255, 0, 200]],
    "waveCount": 5,
    "waveHeight": 0.6,
    "flowPattern": "dancing_curtains",
    "intensity": 0.8,
    "shimmerSpeed": 1.2
  },
  "soundProperties": {
    "soundscapeName": "Polar Drone",
    "baseFrequency": 110,
    "harmonicComplexity": 2.4,
    "oscillatorType": "custom_aurora",
    "durationSeconds": 60,
    "spatialEffect": 0.7,
    "atmosphericReverb": 0.8
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: ContentKind) -> CompletionRequest {
        CompletionRequest {
            kind,
            system: String::new(),
            user: String::new(),
            temperature: None,
            json_output: true,
        }
    }

    #[test]
    fn test_canned_replies_are_json_objects() {
        for kind in ContentKind::ALL {
            let value: serde_json::Value = serde_json::from_str(canned_reply(kind)).unwrap();
            assert!(value.is_object(), "{kind} reply is not an object");
        }
    }

    #[test]
    fn test_scripted_then_canned() {
        let provider = MockProvider::scripted(vec!["first".to_string()]);
        assert_eq!(provider.complete(&request(ContentKind::Weather)).unwrap(), "first");
        assert_eq!(
            provider.complete(&request(ContentKind::Weather)).unwrap(),
            WEATHER_REPLY
        );
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_failing_provider() {
        let provider = MockProvider::failing("connection reset");
        assert!(matches!(
            provider.complete(&request(ContentKind::Plant)),
            Err(GardenError::Transport(ref m)) if m == "connection reset"
        ));
    }
}
