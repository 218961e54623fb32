use serde::{Deserialize, Serialize};

/// Bias check outcome as returned to the browser.
///
/// Field names are part of the public JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasCheckResult {
    pub bias_detected: bool,
    pub bias_types: Vec<String>,
    pub suggestion: String,
}

impl BiasCheckResult {
    /// Result for text with no detected bias
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// How confident the classifier was that the top bias label applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Bucket a classifier score: above 0.75 is high, above 0.4 medium.
    ///
    /// Text judged unbiased is always low.
    pub fn from_score(bias_detected: bool, score: f64) -> Self {
        if !bias_detected {
            Severity::Low
        } else if score > 0.75 {
            Severity::High
        } else if score > 0.4 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}
