//! Feature extraction from raw prediction request bodies.
//!
//! Requests carry an arbitrary JSON object. Only the keys the heuristic reads
//! are validated; everything else is ignored.

use crate::error::{json_type_name, InputError};
use crate::types::features::{FeatureInput, AMOUNT_KEY, TIME_KEY};
use serde_json::{Map, Number, Value};

/// Turns a JSON request body into a [`FeatureInput`].
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a request body.
    ///
    /// A missing key yields `None`. A key that is present but not a JSON
    /// number is rejected, including `null` and booleans. Numbers beyond the
    /// `f64` range read as positive or negative infinity.
    pub fn extract(&self, body: &Value) -> Result<FeatureInput, InputError> {
        let fields = body.as_object().ok_or_else(|| InputError::NotAnObject {
            found: json_type_name(body),
        })?;

        Ok(FeatureInput {
            amount: numeric_field(fields, AMOUNT_KEY)?,
            time: numeric_field(fields, TIME_KEY)?,
        })
    }

    /// Get the number of features read from each request.
    pub fn feature_count(&self) -> usize {
        self.feature_names().len()
    }

    /// Get the request keys that are read.
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![AMOUNT_KEY, TIME_KEY]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric_field(fields: &Map<String, Value>, key: &str) -> Result<Option<f64>, InputError> {
    match fields.get(key) {
        None => Ok(None),
        Some(Value::Number(number)) => Ok(Some(number_to_f64(number))),
        Some(value) => Err(InputError::NonNumeric {
            key: key.to_string(),
            found: json_type_name(value),
        }),
    }
}

// Bodies keep the literal number text, so "1e400" parses to infinity instead
// of failing at the JSON layer.
fn number_to_f64(number: &Number) -> f64 {
    number
        .as_f64()
        .or_else(|| number.to_string().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
