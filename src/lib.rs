//! Fraud Mock API Library
//!
//! A mock fraud detection service: a fixed heuristic over the `Amount` and
//! `Time` transaction attributes, perturbed by a small random jitter, served
//! over HTTP.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod metrics;
pub mod models;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::InputError;
pub use feature_extractor::FeatureExtractor;
pub use models::heuristic::HeuristicScorer;
pub use server::{router, AppState};
pub use types::{FeatureInput, HealthStatus, Prediction};
