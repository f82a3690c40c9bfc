// ============================================================
// Layer 1 - HTTP Handlers
// ============================================================
// Request bodies are read as raw bytes and picked apart by
// field name, so each failure maps to its own PredictError.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::sample::{FeatureVector, SoilSample, FEATURE_NAMES, NUM_FEATURES};
use crate::http::error::PredictError;
use crate::http::ApiState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub crop: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub trees:  usize,
    pub labels: usize,
}

/// `POST /predict`
pub async fn predict(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, PredictError> {
    let sample = parse_sample(&body)?;
    let crop = state
        .recommender
        .recommend(&sample)
        .map_err(|e| PredictError::Model { cause: format!("{e:#}") })?;
    Ok(Json(PredictResponse { crop }))
}

/// `GET /health`
pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        trees:  state.recommender.ensemble_size(),
        labels: state.recommender.labels().len(),
    })
}

/// Pull the seven features out of a JSON object by name.
///
/// Extra keys are ignored. Numbers are taken as-is; strings that
/// parse as a finite number are coerced, matching what a
/// browser form tends to send.
pub fn parse_sample(body: &[u8]) -> Result<SoilSample, PredictError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictError::MalformedBody { reason: e.to_string() })?;
    let Value::Object(obj) = value else {
        return Err(PredictError::MalformedBody {
            reason: "expected a JSON object".to_string(),
        });
    };

    let mut v: FeatureVector = [0.0; NUM_FEATURES];
    for (slot, field) in v.iter_mut().zip(FEATURE_NAMES) {
        *slot = field_value(&obj, field)?;
    }
    Ok(SoilSample::from_vector(v))
}

fn field_value(obj: &Map<String, Value>, field: &'static str) -> Result<f64, PredictError> {
    let invalid = |reason: String| PredictError::InvalidField { field, reason };

    let n = match obj.get(field) {
        None => return Err(PredictError::MissingField { field }),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{n} is not representable as f64")))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("'{s}' is not a number")))?,
        Some(other) => return Err(invalid(format!("expected a number, got {other}"))),
    };

    if !n.is_finite() {
        return Err(invalid(format!("{n} is not a finite number")));
    }
    Ok(n)
}
