//! Bias analyzer lifecycle and the HTTP zero-shot client
//!
//! The analyzer is a process-wide resource: built on the first bias request,
//! shared behind an `Arc`, and dropped explicitly at shutdown.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bias_checker::{
    BiasAnalyzer, BiasError, Classification, PatternAnalyzer, ZeroShotAnalyzer,
    ZeroShotClassifier,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{AnalyzerConfig, AnalyzerKind};

/// Zero-shot classifier reached over HTTP (Hugging Face inference format)
pub struct HttpZeroShotClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters<'a>,
}

#[derive(Serialize)]
struct InferenceParameters<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

impl HttpZeroShotClassifier {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, BiasError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| BiasError::Unavailable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl ZeroShotClassifier for HttpZeroShotClassifier {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification, BiasError> {
        debug!("Classifying {} chars against {} labels", text.len(), labels.len());

        let body = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                candidate_labels: labels,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BiasError::Classifier(e.to_string()))?;

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| BiasError::InvalidResponse(e.to_string()))?;

        rank_by_score(parsed.labels, parsed.scores)
    }

    fn name(&self) -> &str {
        "zero-shot-http"
    }
}

/// Order labels by descending score. Endpoints usually sort already, but the
/// top label is what decides the verdict, so don't rely on it.
fn rank_by_score(labels: Vec<String>, scores: Vec<f64>) -> Result<Classification, BiasError> {
    if labels.len() != scores.len() {
        return Err(BiasError::InvalidResponse(format!(
            "{} labels but {} scores",
            labels.len(),
            scores.len()
        )));
    }

    let mut pairs: Vec<(String, f64)> = labels.into_iter().zip(scores).collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (labels, scores) = pairs.into_iter().unzip();
    Ok(Classification { labels, scores })
}

/// Build the analyzer described by `config`.
pub fn build_analyzer(config: &AnalyzerConfig) -> Result<Arc<dyn BiasAnalyzer>, BiasError> {
    match config.kind {
        AnalyzerKind::Pattern => Ok(Arc::new(PatternAnalyzer::new())),
        AnalyzerKind::ZeroShot => {
            let classifier = HttpZeroShotClassifier::new(config)?;
            Ok(Arc::new(ZeroShotAnalyzer::new(classifier)))
        }
    }
}

/// Lazily-initialised, shared bias analyzer
pub struct AnalyzerHandle {
    config: AnalyzerConfig,
    slot: RwLock<Option<Arc<dyn BiasAnalyzer>>>,
}

impl AnalyzerHandle {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            slot: RwLock::new(None),
        }
    }

    /// Handle that starts out holding `analyzer`
    pub fn with_analyzer(analyzer: Arc<dyn BiasAnalyzer>) -> Self {
        Self {
            config: AnalyzerConfig::default(),
            slot: RwLock::new(Some(analyzer)),
        }
    }

    /// Get the analyzer, building it on first use.
    ///
    /// After [`AnalyzerHandle::teardown`] the next call builds a fresh one.
    pub async fn get(&self) -> Result<Arc<dyn BiasAnalyzer>, BiasError> {
        if let Some(analyzer) = self.slot.read().await.as_ref() {
            return Ok(Arc::clone(analyzer));
        }

        let mut slot = self.slot.write().await;
        // Another request may have initialised it while we waited
        if let Some(analyzer) = slot.as_ref() {
            return Ok(Arc::clone(analyzer));
        }

        let analyzer = build_analyzer(&self.config)?;
        info!("Initialised bias analyzer: {}", analyzer.name());
        *slot = Some(Arc::clone(&analyzer));
        Ok(analyzer)
    }

    pub async fn is_initialized(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Drop the shared analyzer
    pub async fn teardown(&self) {
        if let Some(analyzer) = self.slot.write().await.take() {
            info!("Released bias analyzer: {}", analyzer.name());
        }
    }
}
