//! Sample Client
//!
//! Generates feature inputs and posts them to a running fraud mock API.
//!
//! Usage: sample-client [base_url] [count] [suspicious_rate] [delay_ms] [--dry-run]

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Request body matching the service's feature keys
#[derive(Debug, Clone, Serialize)]
struct FeatureRequest {
    #[serde(rename = "Time")]
    time: f64,
    #[serde(rename = "Amount")]
    amount: f64,
    /// Extra attribute the service ignores, as in the card transactions dataset
    #[serde(rename = "V1")]
    v1: f64,
}

/// Response body from `POST /predict`
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    fraud_probability: f64,
    fraud_label: u8,
}

/// Feature input generator
struct FeatureGenerator {
    rng: rand::rngs::ThreadRng,
}

impl FeatureGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Generate a small daytime purchase
    fn generate_legitimate(&mut self) -> FeatureRequest {
        FeatureRequest {
            time: self.rng.gen_range(0.0..100_000.0),
            amount: self.rng.gen_range(1.0..500.0),
            v1: self.rng.gen_range(-2.0..2.0),
        }
    }

    /// Generate a large, late purchase
    fn generate_suspicious(&mut self) -> FeatureRequest {
        FeatureRequest {
            time: self.rng.gen_range(100_001.0..172_800.0),
            amount: self.rng.gen_range(1_001.0..10_000.0),
            v1: self.rng.gen_range(-30.0..-5.0),
        }
    }
}

/// Parse a probability argument, falling back on missing or non-finite input
fn parse_rate(arg: Option<&str>, default: f64) -> f64 {
    arg.and_then(|s| s.parse::<f64>().ok())
        .filter(|rate| rate.is_finite())
        .unwrap_or(default)
        .clamp(0.0, 1.0)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("sample_client=info"))
        .init();

    info!("Starting Sample Client");

    // Parse arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");
    let positional: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();
    let base_url = positional.first().copied().unwrap_or("http://127.0.0.1:8000");
    let count: u64 = positional.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
    let suspicious_rate = parse_rate(positional.get(2).copied(), 0.1);
    let delay_ms: u64 = positional.get(3).and_then(|s| s.parse().ok()).unwrap_or(50);

    info!(
        base_url = %base_url,
        count = count,
        suspicious_rate = suspicious_rate,
        delay_ms = delay_ms,
        dry_run = dry_run,
        "Configuration loaded"
    );

    if dry_run {
        return run_dry_mode(count, suspicious_rate, delay_ms).await;
    }

    let client = reqwest::Client::new();
    let predict_url = format!("{}/predict", base_url.trim_end_matches('/'));

    if let Err(e) = client
        .get(format!("{}/health", base_url.trim_end_matches('/')))
        .send()
        .await
        .and_then(|r| r.error_for_status())
    {
        warn!(error = %e, "Service unreachable. Running in dry-run mode.");
        return run_dry_mode(count, suspicious_rate, delay_ms).await;
    }

    let mut generator = FeatureGenerator::new();
    let mut rng = rand::thread_rng();

    let mut sent_suspicious = 0u64;
    let mut flagged = 0u64;
    let mut failed = 0u64;

    for i in 0..count {
        let request = if rng.gen_bool(suspicious_rate) {
            sent_suspicious += 1;
            generator.generate_suspicious()
        } else {
            generator.generate_legitimate()
        };

        let response = client.post(&predict_url).json(&request).send().await;
        match response {
            Ok(r) if r.status().is_success() => {
                let prediction: PredictionResponse = r.json().await?;
                if prediction.fraud_label == 1 {
                    flagged += 1;
                }
                if (i + 1) % 10 == 0 {
                    info!(
                        "Sent {}/{} (last probability {:.4}, {} flagged so far)",
                        i + 1,
                        count,
                        prediction.fraud_probability,
                        flagged
                    );
                }
            }
            Ok(r) => {
                failed += 1;
                let status = r.status();
                let detail = r.text().await.unwrap_or_default();
                warn!(status = %status, detail = %detail, "Prediction rejected");
            }
            Err(e) => {
                failed += 1;
                warn!(error = %e, "Request failed");
            }
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        "Completed! Sent {} inputs ({} suspicious): {} flagged, {} failed",
        count, sent_suspicious, flagged, failed
    );

    Ok(())
}

async fn run_dry_mode(count: u64, suspicious_rate: f64, delay_ms: u64) -> anyhow::Result<()> {
    info!("Running in dry-run mode (no requests sent)");

    let mut generator = FeatureGenerator::new();
    let mut rng = rand::thread_rng();

    for i in 0..count {
        let request = if rng.gen_bool(suspicious_rate) {
            generator.generate_suspicious()
        } else {
            generator.generate_legitimate()
        };

        let json = serde_json::to_string_pretty(&request)?;

        if (i + 1) % 10 == 0 || i == 0 {
            info!("Sample input {}:\n{}", i + 1, json);
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    Ok(())
}
