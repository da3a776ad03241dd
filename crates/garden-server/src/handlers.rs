//! Endpoint handlers
//!
//! Generation is blocking, so every service call runs on the blocking pool.

use crate::error::ApiError;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use garden_core::{ContentKind, Result};
use garden_gen::{BatchOutcome, GardenService};
use garden_schema::{coerce_integer, AuroraSpec, PlantSpec, RainbowSpec, WeatherSpec};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub type AppState = Arc<GardenService>;

/// Body of a successful plant request
#[derive(Debug, Serialize)]
pub struct PlantsResponse {
    pub plants: Vec<PlantSpec>,
    pub total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<BatchOutcome<PlantSpec>> for PlantsResponse {
    fn from(outcome: BatchOutcome<PlantSpec>) -> Self {
        Self {
            plants: outcome.items,
            total: outcome.total,
            errors: outcome.errors,
        }
    }
}

/// Read `quantity` from an optional JSON body.
///
/// An empty body, a missing field or `null` mean "one". Floats round to the
/// nearest integer and numeric strings use their leading digits. Numbers
/// beyond the `i64` range saturate.
pub fn parse_quantity(body: &[u8]) -> std::result::Result<Option<i64>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let quantity = match &value {
        Value::Object(map) => map.get("quantity"),
        Value::Null => None,
        _ => {
            return Err(ApiError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ))
        }
    };

    Ok(match quantity {
        None | Some(Value::Null) => None,
        Some(raw) => raw
            .as_i64()
            .or_else(|| coerce_integer(raw).and_then(|v| v.as_i64()))
            .or_else(|| raw.as_f64().map(|f| f.round() as i64)),
    })
}

async fn run_blocking<T, F>(
    service: AppState,
    kind: ContentKind,
    call: F,
) -> std::result::Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&GardenService) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|_| ApiError::Internal)?
        .map_err(|e| ApiError::service(kind, e))
}

pub async fn generate_plant(
    State(service): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<PlantsResponse>, ApiError> {
    let quantity = parse_quantity(&body)?;
    debug!(?quantity, "plant request");
    let outcome = run_blocking(service, ContentKind::Plant, move |s| {
        s.generate_plants(quantity)
    })
    .await?;
    Ok(Json(outcome.into()))
}

pub async fn generate_rainbow(
    State(service): State<AppState>,
) -> std::result::Result<Json<RainbowSpec>, ApiError> {
    run_blocking(service, ContentKind::Rainbow, GardenService::generate_rainbow)
        .await
        .map(Json)
}

pub async fn generate_weather(
    State(service): State<AppState>,
) -> std::result::Result<Json<WeatherSpec>, ApiError> {
    run_blocking(service, ContentKind::Weather, GardenService::generate_weather)
        .await
        .map(Json)
}

pub async fn generate_aurora(
    State(service): State<AppState>,
) -> std::result::Result<Json<AuroraSpec>, ApiError> {
    run_blocking(service, ContentKind::Aurora, GardenService::generate_aurora)
        .await
        .map(Json)
}

pub async fn health(State(service): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "providers": service.provider_names(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults() {
        assert_eq!(parse_quantity(b"").unwrap(), None);
        assert_eq!(parse_quantity(b"  \n").unwrap(), None);
        assert_eq!(parse_quantity(b"{}").unwrap(), None);
        assert_eq!(parse_quantity(b"null").unwrap(), None);
        assert_eq!(parse_quantity(br#"{"quantity": null}"#).unwrap(), None);
    }

    #[test]
    fn test_quantity_forms() {
        assert_eq!(parse_quantity(br#"{"quantity": 4}"#).unwrap(), Some(4));
        assert_eq!(parse_quantity(br#"{"quantity": 2.6}"#).unwrap(), Some(3));
        assert_eq!(parse_quantity(br#"{"quantity": "7"}"#).unwrap(), Some(7));
        assert_eq!(parse_quantity(br#"{"quantity": -2}"#).unwrap(), Some(-2));
        assert_eq!(parse_quantity(br#"{"quantity": "lots"}"#).unwrap(), None);
    }

    #[test]
    fn test_quantity_out_of_range_saturates() {
        assert_eq!(
            parse_quantity(br#"{"quantity": 1e30}"#).unwrap(),
            Some(i64::MAX)
        );
        assert_eq!(
            parse_quantity(br#"{"quantity": 18446744073709551615}"#).unwrap(),
            Some(i64::MAX)
        );
        assert_eq!(
            parse_quantity(br#"{"quantity": -1e30}"#).unwrap(),
            Some(i64::MIN)
        );
    }

    #[test]
    fn test_quantity_rejects_bad_body() {
        assert!(matches!(parse_quantity(b"{quantity: 3"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_quantity(b"[3]"), Err(ApiError::BadRequest(_))));
    }
}
