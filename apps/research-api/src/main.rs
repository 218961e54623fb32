//! Research API Server
//!
//! Serves the UX-research utilities to the website front-end. Provides REST
//! API endpoints for:
//!
//! - Bias checking of survey and interview questions
//! - Confidence estimation and required sample size
//! - Two-proportion significance tests
//!
//! ## Architecture
//!
//! The statistics are pure functions from `research-stats`; the bias checker
//! comes from `bias-checker` and is either local regex rules or an external
//! zero-shot model. The server adds:
//!
//! - Rate limiting via tower-governor
//! - A lazily-built, shared bias analyzer with a per-request timeout
//! - Graceful shutdown that releases the analyzer

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod classifier;
mod config;
mod error;

use api::{
    handle_analyze_bias, handle_confidence, handle_health, handle_sample_size,
    handle_significance,
};
use classifier::AnalyzerHandle;
use config::Args;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Bias analyzer, built on first use
    pub analyzer: Arc<AnalyzerHandle>,
    /// Upper bound on a single bias analysis in milliseconds
    pub classifier_timeout_ms: u64,
}

/// Routes without middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/analyze-bias", post(handle_analyze_bias))
        .route("/api/confidence", post(handle_confidence))
        .route("/api/sample-size", post(handle_sample_size))
        .route("/api/significance", post(handle_significance))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting research API on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    // Create shared state
    let state = AppState {
        analyzer: Arc::new(AnalyzerHandle::new(args.analyzer_config())),
        classifier_timeout_ms: args.classifier_timeout_ms,
    };
    let analyzer = Arc::clone(&state.analyzer);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Apply middleware
    let app = build_router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!(
        "Bias analyzer: {:?}, timeout {}ms",
        args.analyzer, args.classifier_timeout_ms
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    analyzer.teardown().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
