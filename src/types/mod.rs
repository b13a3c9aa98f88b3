//! Type definitions for the fraud mock API

pub mod features;
pub mod prediction;

pub use features::FeatureInput;
pub use prediction::{ErrorBody, HealthStatus, Prediction};
