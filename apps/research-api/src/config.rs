//! Command-line and environment configuration
//!
//! Every flag can also be set through the environment (or a `.env` file,
//! loaded at startup).

use clap::{Parser, ValueEnum};

/// Hosted zero-shot inference endpoint used when none is configured
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Which bias analyzer backs `/api/analyze-bias`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalyzerKind {
    /// Local regex rules, no network access
    Pattern,
    /// External zero-shot classification model
    ZeroShot,
}

/// Command-line arguments for the research API server
#[derive(Parser, Debug, Clone)]
#[command(name = "research-api")]
#[command(about = "HTTP API for sample-size, significance and bias checks")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "RATE_LIMIT", default_value = "10")]
    pub rate_limit: u32,

    /// Bias analyzer backend
    #[arg(long, env = "BIAS_ANALYZER", value_enum, default_value_t = AnalyzerKind::Pattern)]
    pub analyzer: AnalyzerKind,

    /// Zero-shot classification endpoint
    #[arg(long, env = "CLASSIFIER_URL", default_value = DEFAULT_CLASSIFIER_URL)]
    pub classifier_url: String,

    /// Bearer token for the classification endpoint
    #[arg(long, env = "CLASSIFIER_TOKEN", hide_env_values = true)]
    pub classifier_token: Option<String>,

    /// Classifier timeout in milliseconds
    #[arg(long, env = "CLASSIFIER_TIMEOUT_MS", default_value = "10000")]
    pub classifier_timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            kind: self.analyzer,
            endpoint: self.classifier_url.clone(),
            api_token: self.classifier_token.clone(),
            timeout_ms: self.classifier_timeout_ms,
        }
    }
}

/// Settings needed to build the bias analyzer on first use
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub kind: AnalyzerKind,
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            kind: AnalyzerKind::Pattern,
            endpoint: DEFAULT_CLASSIFIER_URL.to_string(),
            api_token: None,
            timeout_ms: 10_000,
        }
    }
}
