//! Mapping of service failures onto HTTP responses

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use garden_core::{ContentKind, GardenError};
use serde_json::{json, Value};
use tracing::{error, warn};

/// Error returned by every API handler. Always rendered as a JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be understood
    BadRequest(String),
    /// The service call for `kind` failed
    Service { kind: ContentKind, source: GardenError },
    /// The blocking task running the call died
    Internal,
}

impl ApiError {
    pub fn service(kind: ContentKind, source: GardenError) -> Self {
        ApiError::Service { kind, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service {
                source: GardenError::RateLimitExceeded { .. },
                ..
            } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Service { .. } | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::BadRequest(message) => json!({ "error": message }),
            ApiError::Service { kind, source } => match source {
                GardenError::RateLimitExceeded { retry_after_secs } => json!({
                    "error": "Too many requests, please try again later",
                    "retryAfter": retry_after_secs,
                }),
                GardenError::BatchFailed { errors } => json!({
                    "error": format!("Failed to generate {}", plural(*kind)),
                    "details": errors,
                }),
                e if e.is_generation_failure() => json!({
                    "error": format!("Failed to generate {}", kind),
                    "details": e.to_string(),
                }),
                e => json!({ "error": e.to_string() }),
            },
            ApiError::Internal => json!({ "error": "Internal server error" }),
        }
    }
}

fn plural(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Plant => "plants",
        ContentKind::Rainbow => "rainbows",
        ContentKind::Weather => "weather",
        ContentKind::Aurora => "auroras",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Service {
                kind,
                source: GardenError::RateLimitExceeded { retry_after_secs },
            } => warn!(%kind, retry_after_secs, "request rejected by rate limiter"),
            ApiError::Service { kind, source } => error!(%kind, error = %source, "request failed"),
            ApiError::BadRequest(message) => warn!(%message, "bad request"),
            ApiError::Internal => error!("generation task did not complete"),
        }

        let mut response = (status, Json(self.body())).into_response();
        if let ApiError::Service {
            source: GardenError::RateLimitExceeded { retry_after_secs },
            ..
        } = &self
        {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(*retry_after_secs));
        }
        response
    }
}
