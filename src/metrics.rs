//! Request metrics and statistics tracking for the fraud mock API.
//!
//! Metrics are only ever logged; they are not exposed over HTTP.

use crate::types::Prediction;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Metrics collector for served requests
pub struct ServiceMetrics {
    /// Predictions returned with HTTP 200
    pub predictions_served: AtomicU64,
    /// Predictions labelled as fraud
    pub fraud_labels: AtomicU64,
    /// Requests rejected with HTTP 400
    pub invalid_requests: AtomicU64,
    /// Health checks answered
    pub health_checks: AtomicU64,
    /// Scoring latencies (in microseconds)
    latencies: RwLock<Vec<u64>>,
    /// Probability distribution buckets
    score_buckets: RwLock<[u64; 10]>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl ServiceMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            fraud_labels: AtomicU64::new(0),
            invalid_requests: AtomicU64::new(0),
            health_checks: AtomicU64::new(0),
            latencies: RwLock::new(Vec::with_capacity(1000)),
            score_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, latency: Duration, prediction: &Prediction) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);
        if prediction.is_fraud() {
            self.fraud_labels.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.latencies.write() {
            times.push(latency.as_micros() as u64);
            if times.len() > MAX_LATENCY_SAMPLES {
                times.drain(0..MAX_LATENCY_SAMPLES / 2);
            }
        }

        let bucket = (prediction.fraud_probability * 10.0).clamp(0.0, 9.0) as usize;
        if let Ok(mut buckets) = self.score_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a rejected request
    pub fn record_invalid(&self) {
        self.invalid_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a health check
    pub fn record_health_check(&self) {
        self.health_checks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get latency statistics over the retained samples
    pub fn get_latency_stats(&self) -> LatencyStats {
        let mut sorted = match self.latencies.read() {
            Ok(times) if !times.is_empty() => times.clone(),
            _ => return LatencyStats::default(),
        };
        sorted.sort_unstable();

        let count = sorted.len();
        let sum: u64 = sorted.iter().sum();
        let percentile = |p: f64| sorted[((count as f64 * p) as usize).min(count - 1)];

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: percentile(0.50),
            p95_us: percentile(0.95),
            p99_us: percentile(0.99),
            max_us: sorted[count - 1],
        }
    }

    /// Get current throughput (predictions per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get probability distribution
    pub fn get_score_distribution(&self) -> [u64; 10] {
        self.score_buckets
            .read()
            .map(|buckets| *buckets)
            .unwrap_or_default()
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let fraud = self.fraud_labels.load(Ordering::Relaxed);
        let invalid = self.invalid_requests.load(Ordering::Relaxed);
        let health = self.health_checks.load(Ordering::Relaxed);
        let fraud_rate = if served > 0 {
            (fraud as f64 / served as f64) * 100.0
        } else {
            0.0
        };

        let latency = self.get_latency_stats();
        let score_dist = self.get_score_distribution();

        info!(
            predictions = served,
            fraud_labels = fraud,
            fraud_rate = format!("{:.1}%", fraud_rate),
            invalid_requests = invalid,
            health_checks = health,
            throughput = format!("{:.1} req/s", self.get_throughput()),
            "Service metrics summary"
        );
        info!(
            mean_us = latency.mean_us,
            p50_us = latency.p50_us,
            p95_us = latency.p95_us,
            p99_us = latency.p99_us,
            max_us = latency.max_us,
            "Scoring latency"
        );

        let total: u64 = score_dist.iter().sum();
        for (i, &count) in score_dist.iter().enumerate().filter(|(_, count)| **count > 0) {
            let pct = if total > 0 {
                (count as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat(((pct / 5.0) as usize).min(20));
            info!(
                "  {:.1}-{:.1}: {:>6} ({:>5.1}%) {}",
                i as f64 / 10.0,
                (i + 1) as f64 / 10.0,
                count,
                pct,
                bar
            );
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoring latency statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Periodic metrics reporter
pub struct MetricsReporter {
    metrics: Arc<ServiceMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<ServiceMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task; returns immediately when disabled
    pub async fn start(self) {
        if self.interval_secs == 0 {
            return;
        }

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::prediction::MODEL_TYPE;

    fn prediction(probability: f64, label: u8) -> Prediction {
        Prediction {
            fraud_probability: probability,
            fraud_label: label,
            model_type: MODEL_TYPE.to_string(),
        }
    }

    #[test]
    fn test_metrics_recording() {
        let metrics = ServiceMetrics::new();

        metrics.record_prediction(Duration::from_micros(100), &prediction(0.12, 0));
        metrics.record_prediction(Duration::from_micros(200), &prediction(0.81, 1));
        metrics.record_invalid();
        metrics.record_health_check();

        assert_eq!(metrics.predictions_served.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.fraud_labels.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.invalid_requests.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.health_checks.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_score_distribution() {
        let metrics = ServiceMetrics::new();

        metrics.record_prediction(Duration::from_micros(10), &prediction(0.01, 0));
        metrics.record_prediction(Duration::from_micros(10), &prediction(0.95, 1));
        metrics.record_prediction(Duration::from_micros(10), &prediction(0.55, 1));

        let dist = metrics.get_score_distribution();
        assert_eq!(dist[0], 1);
        assert_eq!(dist[5], 1);
        assert_eq!(dist[9], 1);
        assert_eq!(dist.iter().sum::<u64>(), 3);
    }

    #[test]
    fn test_latency_stats() {
        let metrics = ServiceMetrics::new();
        assert_eq!(metrics.get_latency_stats(), LatencyStats::default());

        for us in 1..=100 {
            metrics.record_prediction(Duration::from_micros(us), &prediction(0.2, 0));
        }

        let stats = metrics.get_latency_stats();
        assert_eq!(stats.count, 100);
        assert_eq!(stats.mean_us, 50);
        assert_eq!(stats.p50_us, 51);
        assert_eq!(stats.max_us, 100);
        assert!(stats.p95_us <= stats.p99_us);
    }
}
