//! Feature input read from a prediction request

/// Request key holding the transaction amount
pub const AMOUNT_KEY: &str = "Amount";

/// Request key holding the seconds elapsed since the first transaction
pub const TIME_KEY: &str = "Time";

/// The two transaction attributes the heuristic reads.
///
/// Filled in by [`FeatureExtractor`](crate::feature_extractor::FeatureExtractor);
/// an absent key stays `None` and is scored as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureInput {
    /// Transaction amount
    pub amount: Option<f64>,

    /// Seconds elapsed since the first transaction in the dataset
    pub time: Option<f64>,
}

impl FeatureInput {
    /// Create an input with both fields present
    pub fn new(amount: f64, time: f64) -> Self {
        Self {
            amount: Some(amount),
            time: Some(time),
        }
    }

    /// Amount, defaulting to 0 when absent
    pub fn amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Time, defaulting to 0 when absent
    pub fn time(&self) -> f64 {
        self.time.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let input = FeatureInput::default();
        assert_eq!(input.amount(), 0.0);
        assert_eq!(input.time(), 0.0);
    }

    #[test]
    fn test_present_fields_read_back() {
        let input = FeatureInput::new(2000.0, -1.5);
        assert_eq!(input.amount(), 2000.0);
        assert_eq!(input.time(), -1.5);
    }

    #[test]
    fn test_partial_input_defaults_missing_field() {
        let input = FeatureInput {
            amount: Some(12.5),
            time: None,
        };
        assert_eq!(input.amount(), 12.5);
        assert_eq!(input.time(), 0.0);
    }
}
