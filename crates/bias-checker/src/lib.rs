//! Bias Checker - flags biased wording in survey and interview questions
//!
//! This crate provides:
//! - An ordered regex rule table covering leading, absolute, loaded,
//!   double-barreled and negatively framed wording
//! - A zero-shot classification seam for delegating to an external model
//! - The [`BiasAnalyzer`] trait unifying both behind one async interface
//! - The [`BiasCheckResult`] JSON shape returned to clients

pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod matcher;
pub mod patterns;
pub mod types;

pub use analyzer::{BiasAnalyzer, PatternAnalyzer, ZeroShotAnalyzer};
pub use classifier::{
    compose_input, Classification, ZeroShotClassifier, ZeroShotVerdict, CANDIDATE_LABELS,
    NO_BIAS_LABEL,
};
pub use error::BiasError;
pub use matcher::{match_bias_patterns, BiasMatch};
pub use patterns::BiasCategory;
pub use types::{BiasCheckResult, Severity};
