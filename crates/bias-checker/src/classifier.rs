//! Zero-shot classification seam
//!
//! The model itself lives outside this crate. Implementors of
//! [`ZeroShotClassifier`] score a text against candidate labels; this module
//! turns the top label into a [`BiasCheckResult`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BiasError;
use crate::types::{BiasCheckResult, Severity};

/// Label meaning the classifier found nothing to flag
pub const NO_BIAS_LABEL: &str = "No bias detected";

/// Candidate labels sent with every classification request
pub const CANDIDATE_LABELS: [&str; 6] = [
    "Leading bias",
    "Loaded language",
    "Double-barreled question",
    "Negative framing",
    "Absolute language",
    NO_BIAS_LABEL,
];

/// Scores for each candidate label, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl Classification {
    /// Highest-scoring label and its score
    pub fn top(&self) -> Option<(&str, f64)> {
        let label = self.labels.first()?;
        let score = self.scores.first().copied().unwrap_or(0.0);
        Some((label.as_str(), score))
    }
}

/// External zero-shot text classifier
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Score `text` against `labels`; results ordered by descending score
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification, BiasError>;

    /// Short identifier for logs
    fn name(&self) -> &str;
}

/// Append optional context to the question text.
pub fn compose_input(input: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.trim().is_empty()) {
        Some(context) => format!("{}\n\nContext:\n{}", input, context),
        None => input.to_string(),
    }
}

/// Suggestion for a classifier label, empty for unknown labels
pub fn suggestion_for_label(label: &str) -> &'static str {
    match label {
        "Leading bias" => "Try rephrasing as an open-ended question.",
        "Loaded language" => "Consider using more neutral terms.",
        "Double-barreled question" => "Split this into two separate questions.",
        "Negative framing" => "Try framing the question in a more neutral or positive way.",
        "Absolute language" => "Avoid words like 'always' or 'never' unless truly accurate.",
        _ => "",
    }
}

/// The classifier's decision about one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZeroShotVerdict {
    pub label: String,
    pub score: f64,
    pub severity: Severity,
}

impl ZeroShotVerdict {
    /// Take the top label of `classification`.
    ///
    /// # Errors
    ///
    /// [`BiasError::InvalidResponse`] if the classifier returned no labels or
    /// mismatched label and score lists.
    pub fn from_classification(classification: &Classification) -> Result<Self, BiasError> {
        if classification.labels.len() != classification.scores.len() {
            return Err(BiasError::InvalidResponse(format!(
                "{} labels but {} scores",
                classification.labels.len(),
                classification.scores.len()
            )));
        }
        let (label, score) = classification
            .top()
            .ok_or_else(|| BiasError::InvalidResponse("no labels returned".to_string()))?;

        let detected = label != NO_BIAS_LABEL;
        Ok(Self {
            label: label.to_string(),
            score,
            severity: Severity::from_score(detected, score),
        })
    }

    pub fn bias_detected(&self) -> bool {
        self.label != NO_BIAS_LABEL
    }

    pub fn into_result(self) -> BiasCheckResult {
        if !self.bias_detected() {
            return BiasCheckResult::neutral();
        }
        let suggestion = suggestion_for_label(&self.label).to_string();
        BiasCheckResult {
            bias_detected: true,
            bias_types: vec![self.label],
            suggestion,
        }
    }
}
