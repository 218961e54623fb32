//! Local regex matcher for biased question wording

use serde::Serialize;

use crate::patterns::{BiasCategory, BIAS_RULES};
use crate::types::BiasCheckResult;

/// Categories matched in a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BiasMatch {
    /// Matched categories in rule order, each at most once
    pub types: Vec<BiasCategory>,
    /// Suggestion for the first matched category, empty when nothing matched
    pub suggestion: String,
}

impl BiasMatch {
    pub fn bias_detected(&self) -> bool {
        !self.types.is_empty()
    }

    /// The category that supplied the suggestion
    pub fn primary(&self) -> Option<BiasCategory> {
        self.types.first().copied()
    }
}

impl From<BiasMatch> for BiasCheckResult {
    fn from(m: BiasMatch) -> Self {
        BiasCheckResult {
            bias_detected: m.bias_detected(),
            bias_types: m.types.iter().map(|c| c.name().to_string()).collect(),
            suggestion: m.suggestion,
        }
    }
}

/// Run every rule against `text`, in declared order.
///
/// # Examples
///
/// ```
/// use bias_checker::{match_bias_patterns, BiasCategory};
///
/// let m = match_bias_patterns("Don't you think this is obviously bad?");
/// assert_eq!(m.primary(), Some(BiasCategory::Leading));
/// assert_eq!(m.suggestion, "Try rephrasing as an open-ended question.");
/// ```
pub fn match_bias_patterns(text: &str) -> BiasMatch {
    let types: Vec<BiasCategory> = BIAS_RULES
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(category, _)| *category)
        .collect();

    let suggestion = types
        .first()
        .map(|c| c.suggestion().to_string())
        .unwrap_or_default();

    BiasMatch { types, suggestion }
}
