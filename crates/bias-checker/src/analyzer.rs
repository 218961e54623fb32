//! Bias analyzers: one interface over the local rules and the external model

use async_trait::async_trait;

use crate::classifier::{compose_input, ZeroShotClassifier, ZeroShotVerdict, CANDIDATE_LABELS};
use crate::error::BiasError;
use crate::matcher::match_bias_patterns;
use crate::types::BiasCheckResult;

/// Something that can judge a research question for wording bias
#[async_trait]
pub trait BiasAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        input: &str,
        context: Option<&str>,
    ) -> Result<BiasCheckResult, BiasError>;

    /// Get the name of this analyzer
    fn name(&self) -> &str;
}

/// Offline analyzer backed by the regex rule table.
///
/// Context is free text describing the study, so only the question itself is
/// matched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BiasAnalyzer for PatternAnalyzer {
    async fn analyze(
        &self,
        input: &str,
        _context: Option<&str>,
    ) -> Result<BiasCheckResult, BiasError> {
        Ok(match_bias_patterns(input).into())
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

/// Analyzer that delegates to a zero-shot classifier and keeps its top label
pub struct ZeroShotAnalyzer<C> {
    classifier: C,
}

impl<C: ZeroShotClassifier> ZeroShotAnalyzer<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify and return the full verdict, including score and severity
    pub async fn verdict(
        &self,
        input: &str,
        context: Option<&str>,
    ) -> Result<ZeroShotVerdict, BiasError> {
        let text = compose_input(input, context);
        let classification = self.classifier.classify(&text, &CANDIDATE_LABELS).await?;
        ZeroShotVerdict::from_classification(&classification)
    }
}

#[async_trait]
impl<C: ZeroShotClassifier> BiasAnalyzer for ZeroShotAnalyzer<C> {
    async fn analyze(
        &self,
        input: &str,
        context: Option<&str>,
    ) -> Result<BiasCheckResult, BiasError> {
        Ok(self.verdict(input, context).await?.into_result())
    }

    fn name(&self) -> &str {
        self.classifier.name()
    }
}
