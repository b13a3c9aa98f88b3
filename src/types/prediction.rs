//! Response bodies returned by the API

use serde::{Deserialize, Serialize};

/// Identifier reported for every prediction and by the health check
pub const MODEL_TYPE: &str = "mock-heuristic";

/// Fraud assessment for a single feature input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Probability in [0.01, 0.95], rounded to 4 decimal places
    pub fraud_probability: f64,
    /// 1 when the transaction is flagged as fraudulent, otherwise 0
    pub fraud_label: u8,
    /// Always [`MODEL_TYPE`]
    pub model_type: String,
}

impl Prediction {
    pub fn is_fraud(&self) -> bool {
        self.fraud_label == 1
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            model: MODEL_TYPE.to_string(),
        }
    }
}

/// Body of every 400 response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_body() {
        let json = serde_json::to_value(HealthStatus::ok()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "ok", "model": "mock-heuristic"})
        );
    }

    #[test]
    fn test_prediction_field_names() {
        let prediction = Prediction {
            fraud_probability: 0.8123,
            fraud_label: 1,
            model_type: MODEL_TYPE.to_string(),
        };

        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["fraud_probability"], 0.8123);
        assert_eq!(json["fraud_label"], 1);
        assert_eq!(json["model_type"], "mock-heuristic");
        assert!(prediction.is_fraud());
    }
}
