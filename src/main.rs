//! Fraud Mock API - Main Entry Point
//!
//! Serves `GET /health` and `POST /predict` on a loopback address until
//! interrupted, then logs a final metrics summary.

use anyhow::{Context, Result};
use fraud_mock_api::{
    config::{AppConfig, LogFormat, LoggingConfig},
    metrics::{MetricsReporter, ServiceMetrics},
    models::heuristic::{HeuristicScorer, JITTER_BOUND},
    router, AppState,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::from_args(std::env::args().skip(1))?;

    init_tracing(&config.logging)?;
    info!("Starting Fraud Mock API");

    let metrics = Arc::new(ServiceMetrics::new());
    let state = AppState::from_config(&config, metrics.clone());
    log_scoring_mode(&config, &state.scorer);
    info!(
        "Feature extractor initialized ({} features: {:?})",
        state.extractor.feature_count(),
        state.extractor.feature_names()
    );

    // Start metrics reporter
    let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
    tokio::spawn(reporter.start());

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Listening on http://{}", bind_address);
    info!("   GET  /health   - Health check");
    info!("   POST /predict  - Fraud prediction");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    // Print final summary
    info!("Fraud Mock API shutting down...");
    metrics.print_summary();

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::new("warn")
        .add_directive(format!("fraud_mock_api={}", logging.level).parse()?);

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    Ok(())
}

fn log_scoring_mode(config: &AppConfig, scorer: &HeuristicScorer) {
    match config.scoring.seed {
        Some(seed) => warn!(
            model = scorer.model_type(),
            seed = seed,
            "Jitter seeded; predictions are reproducible"
        ),
        None => info!(
            model = scorer.model_type(),
            jitter_bound = JITTER_BOUND,
            "Heuristic scorer ready"
        ),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
