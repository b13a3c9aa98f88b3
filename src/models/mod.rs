//! Fraud scoring components

pub mod heuristic;
pub mod jitter;

pub use heuristic::HeuristicScorer;
pub use jitter::{FixedJitter, JitterSource, SeededJitter, UniformJitter};
