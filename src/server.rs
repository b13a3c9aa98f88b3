//! HTTP endpoint layer: routing, request handling and response mapping

use crate::config::{AppConfig, ScoringConfig};
use crate::error::InputError;
use crate::feature_extractor::FeatureExtractor;
use crate::metrics::ServiceMetrics;
use crate::models::heuristic::HeuristicScorer;
use crate::models::jitter::{JitterSource, SeededJitter, UniformJitter};
use crate::types::{HealthStatus, Prediction};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub scorer: HeuristicScorer,
    pub extractor: Arc<FeatureExtractor>,
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    /// Build state with an explicit randomness provider
    pub fn new(jitter: Arc<dyn JitterSource>, metrics: Arc<ServiceMetrics>) -> Self {
        Self {
            scorer: HeuristicScorer::new(jitter),
            extractor: Arc::new(FeatureExtractor::new()),
            metrics,
        }
    }

    /// Build state from configuration
    pub fn from_config(config: &AppConfig, metrics: Arc<ServiceMetrics>) -> Self {
        Self::new(jitter_source(&config.scoring), metrics)
    }
}

/// Select the randomness provider for the configured scoring mode
pub fn jitter_source(config: &ScoringConfig) -> Arc<dyn JitterSource> {
    match config.seed {
        Some(seed) => Arc::new(SeededJitter::new(seed)),
        None => Arc::new(UniformJitter),
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    state.metrics.record_health_check();
    Json(HealthStatus::ok())
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Prediction>, InputError> {
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    match score_body(&state, body) {
        Ok(prediction) => {
            let latency = start_time.elapsed();
            state.metrics.record_prediction(latency, &prediction);
            debug!(
                request_id = %request_id,
                fraud_probability = prediction.fraud_probability,
                fraud_label = prediction.fraud_label,
                latency_us = latency.as_micros(),
                "Prediction served"
            );
            Ok(Json(prediction))
        }
        Err(e) => {
            state.metrics.record_invalid();
            warn!(request_id = %request_id, error = %e, "Rejected prediction request");
            Err(e)
        }
    }
}

/// The body is parsed here rather than by axum's `Json` extractor so that the
/// `Content-Type` header is not required and out-of-range numbers survive as
/// literal text until feature extraction.
fn score_body(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<Prediction, InputError> {
    let bytes = body.map_err(|rejection| InputError::MalformedBody {
        reason: rejection.body_text(),
    })?;
    let body: Value = serde_json::from_slice(&bytes).map_err(|e| InputError::MalformedBody {
        reason: e.to_string(),
    })?;
    let features = state.extractor.extract(&body)?;
    Ok(state.scorer.score(&features))
}
