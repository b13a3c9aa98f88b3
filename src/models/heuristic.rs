//! Rule-based fraud scorer standing in for a trained model.
//!
//! The score starts from a base risk, gains fixed increments for large
//! amounts and late transactions, is perturbed by a jitter draw, then clamped
//! to [`MIN_PROBABILITY`, `MAX_PROBABILITY`].

use crate::models::jitter::JitterSource;
use crate::types::features::FeatureInput;
use crate::types::prediction::{Prediction, MODEL_TYPE};
use std::sync::Arc;

pub const BASE_RISK: f64 = 0.1;

pub const AMOUNT_THRESHOLD: f64 = 1000.0;
pub const AMOUNT_RISK: f64 = 0.4;

pub const TIME_THRESHOLD: f64 = 100_000.0;
pub const TIME_RISK: f64 = 0.3;

/// Jitter is drawn uniformly from `[-JITTER_BOUND, JITTER_BOUND]`
pub const JITTER_BOUND: f64 = 0.1;

pub const MIN_PROBABILITY: f64 = 0.01;
pub const MAX_PROBABILITY: f64 = 0.95;

/// Risk strictly above this is labelled fraud
pub const LABEL_THRESHOLD: f64 = 0.5;

const ROUNDING_SCALE: f64 = 10_000.0;

/// Risk before jitter and clamping
pub fn base_risk(input: &FeatureInput) -> f64 {
    let mut risk = BASE_RISK;
    if input.amount() > AMOUNT_THRESHOLD {
        risk += AMOUNT_RISK;
    }
    if input.time() > TIME_THRESHOLD {
        risk += TIME_RISK;
    }
    risk
}

/// Clamp a raw risk into the reportable probability range
pub fn clamp_probability(risk: f64) -> f64 {
    risk.min(MAX_PROBABILITY).max(MIN_PROBABILITY)
}

/// Round to 4 decimal places
pub fn round_probability(probability: f64) -> f64 {
    (probability * ROUNDING_SCALE).round() / ROUNDING_SCALE
}

/// Score an input with a caller-supplied jitter draw.
///
/// The label is decided on the clamped risk before rounding, so a risk of
/// 0.50004 reports probability 0.5 with label 1.
pub fn score_with_jitter(input: &FeatureInput, jitter: f64) -> Prediction {
    let jitter = jitter.clamp(-JITTER_BOUND, JITTER_BOUND);
    let risk = clamp_probability(base_risk(input) + jitter);

    Prediction {
        fraud_probability: round_probability(risk),
        fraud_label: u8::from(risk > LABEL_THRESHOLD),
        model_type: MODEL_TYPE.to_string(),
    }
}

/// Heuristic scorer with an injected randomness provider
#[derive(Clone)]
pub struct HeuristicScorer {
    jitter: Arc<dyn JitterSource>,
}

impl HeuristicScorer {
    pub fn new(jitter: Arc<dyn JitterSource>) -> Self {
        Self { jitter }
    }

    /// Score an input, drawing the jitter from the configured source
    pub fn score(&self, input: &FeatureInput) -> Prediction {
        let jitter = self.jitter.sample(JITTER_BOUND);
        score_with_jitter(input, jitter)
    }

    pub fn model_type(&self) -> &'static str {
        MODEL_TYPE
    }
}

impl std::fmt::Debug for HeuristicScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicScorer")
            .field("model_type", &MODEL_TYPE)
            .finish_non_exhaustive()
    }
}
