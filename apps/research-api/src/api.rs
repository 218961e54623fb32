//! API handlers for the research API
//!
//! Provides REST endpoints for:
//! - Bias checking of research questions
//! - Confidence estimation for a collected sample
//! - Required sample size
//! - Two-proportion significance tests

use std::time::Duration;

use axum::{extract::State, Json};
use bias_checker::BiasCheckResult;
use research_stats::{
    critical_value, RateComparison, RequiredSizeQuery, SampleSizeQuery, SampleSizeReport,
    SignificanceResult, SignificanceTier, TwoProportionQuery, DEFAULT_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "research-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Bias check request body
#[derive(Deserialize)]
pub struct AnalyzeBiasRequest {
    /// The research question to check
    #[serde(alias = "text")]
    pub input: String,

    /// Optional description of the study (purpose, audience)
    #[serde(default)]
    pub context: Option<String>,
}

/// Handler: POST /api/analyze-bias
pub async fn handle_analyze_bias(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeBiasRequest>,
) -> Result<Json<BiasCheckResult>, ServerError> {
    if req.input.trim().is_empty() {
        return Err(ServerError::InvalidRequest(
            "input must not be empty".to_string(),
        ));
    }

    let analyzer = state.analyzer.get().await?;
    info!(
        "Bias check: analyzer={}, chars={}",
        analyzer.name(),
        req.input.len()
    );

    let timeout_ms = state.classifier_timeout_ms;
    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        analyzer.analyze(&req.input, req.context.as_deref()),
    )
    .await
    .map_err(|_| ServerError::Timeout(timeout_ms))??;

    debug!("Bias types: {:?}", result.bias_types);
    Ok(Json(result))
}

/// Confidence estimate response
#[derive(Serialize)]
pub struct ConfidenceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: SampleSizeReport,
}

/// Handler: POST /api/confidence
pub async fn handle_confidence(
    Json(query): Json<SampleSizeQuery>,
) -> Result<Json<ConfidenceResponse>, ServerError> {
    debug!(
        "Confidence: n={}, N={}, margin={}",
        query.sample_size, query.population_size, query.margin_target
    );

    let report = query.report()?;

    Ok(Json(ConfidenceResponse {
        success: true,
        report,
    }))
}

/// Required sample size response
#[derive(Serialize)]
pub struct RequiredSizeResponse {
    pub success: bool,
    pub required_sample_size: u64,
}

/// Handler: POST /api/sample-size
pub async fn handle_sample_size(
    Json(query): Json<RequiredSizeQuery>,
) -> Result<Json<RequiredSizeResponse>, ServerError> {
    let required_sample_size = query.solve()?;

    Ok(Json(RequiredSizeResponse {
        success: true,
        required_sample_size,
    }))
}

/// Significance test request body
#[derive(Deserialize)]
pub struct SignificanceRequest {
    #[serde(flatten)]
    pub query: TwoProportionQuery,

    /// Explicit critical value for |z|
    pub threshold: Option<f64>,

    /// Confidence level (0.90, 0.95, 0.98 or 0.99) to derive the critical value from
    pub confidence: Option<f64>,
}

/// Significance test response
#[derive(Serialize)]
pub struct SignificanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: SignificanceResult,
    pub tier: SignificanceTier,
    pub tier_description: &'static str,
    pub comparison: RateComparison,
    pub comparison_description: String,
}

/// Handler: POST /api/significance
pub async fn handle_significance(
    Json(req): Json<SignificanceRequest>,
) -> Result<Json<SignificanceResponse>, ServerError> {
    let threshold = resolve_threshold(req.threshold, req.confidence)?;
    let result = req.query.test(threshold)?;

    info!(
        "Significance: z={:.3}, threshold={}, significant={}",
        result.z_score, threshold, result.is_significant
    );

    let tier = result.tier();
    let comparison = result.comparison();

    Ok(Json(SignificanceResponse {
        success: true,
        result,
        tier,
        tier_description: tier.description(),
        comparison,
        comparison_description: comparison.describe(),
    }))
}

/// Pick the critical value from an explicit threshold or a confidence level
pub(crate) fn resolve_threshold(
    threshold: Option<f64>,
    confidence: Option<f64>,
) -> Result<f64, ServerError> {
    match (threshold, confidence) {
        (Some(_), Some(_)) => Err(ServerError::InvalidRequest(
            "Specify either 'threshold' or 'confidence', not both".to_string(),
        )),
        (Some(threshold), None) => Ok(threshold),
        (None, Some(confidence)) => Ok(critical_value(confidence)?),
        (None, None) => Ok(DEFAULT_THRESHOLD),
    }
}
