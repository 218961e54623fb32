//! Bias categories and the regex rules that detect them
//!
//! Rules are evaluated in declaration order. That order matters: the first
//! category to match supplies the primary suggestion.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kinds of wording bias the local matcher recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiasCategory {
    /// Question steers the respondent toward an answer
    #[serde(rename = "Leading")]
    Leading,
    /// Always/never style wording
    #[serde(rename = "Absolute")]
    Absolute,
    /// Emotionally charged terms
    #[serde(rename = "Loaded Language")]
    LoadedLanguage,
    /// Two questions asked as one
    #[serde(rename = "Double-barreled")]
    DoubleBarreled,
    /// Question presupposes a bad experience
    #[serde(rename = "Negative Framing")]
    NegativeFraming,
}

impl BiasCategory {
    /// All categories in evaluation order
    pub const ALL: [BiasCategory; 5] = [
        BiasCategory::Leading,
        BiasCategory::Absolute,
        BiasCategory::LoadedLanguage,
        BiasCategory::DoubleBarreled,
        BiasCategory::NegativeFraming,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BiasCategory::Leading => "Leading",
            BiasCategory::Absolute => "Absolute",
            BiasCategory::LoadedLanguage => "Loaded Language",
            BiasCategory::DoubleBarreled => "Double-barreled",
            BiasCategory::NegativeFraming => "Negative Framing",
        }
    }

    /// Rewording advice shown when this category is the primary match
    pub fn suggestion(&self) -> &'static str {
        match self {
            BiasCategory::Leading => "Try rephrasing as an open-ended question.",
            BiasCategory::Absolute => {
                "Avoid words like 'always' or 'never' unless truly accurate."
            }
            BiasCategory::LoadedLanguage => "Consider using more neutral terms.",
            BiasCategory::DoubleBarreled => "Split this into two separate questions.",
            BiasCategory::NegativeFraming => {
                "Try framing the question in a more neutral or positive way."
            }
        }
    }

    /// Whether the category's rule matches `text` (case-insensitive)
    pub fn matches(&self, text: &str) -> bool {
        BIAS_RULES
            .iter()
            .find(|(category, _)| category == self)
            .is_some_and(|(_, pattern)| pattern.is_match(text))
    }
}

impl std::fmt::Display for BiasCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    /// Ordered rule table; one pattern per category
    pub static ref BIAS_RULES: Vec<(BiasCategory, Regex)> = vec![
        (
            BiasCategory::Leading,
            Regex::new(
                r"(?i)\b(?:(?:don['’]t|wouldn['’]t|isn['’]t|aren['’]t|doesn['’]t|shouldn['’]t)\s+(?:you|it|this|that|they)\b|obviously|clearly|surely|of\s+course|everyone\s+knows|most\s+people\s+(?:agree|think|feel)|(?:do|would)\s+you\s+agree)\b",
            )
            .unwrap(),
        ),
        (
            BiasCategory::Absolute,
            Regex::new(
                r"(?i)\b(?:always|never|every\s*(?:one|body|time)|no\s*one|nobody|nothing|completely|totally|entirely|all\s+the\s+time)\b",
            )
            .unwrap(),
        ),
        (
            BiasCategory::LoadedLanguage,
            Regex::new(
                r"(?i)\b(?:bad|terrible|awful|horrible|amazing|fantastic|wonderful|awesome|disgusting|ridiculous|stupid|useless|pathetic|outrageous|waste(?:ful)?|love|hate)\b",
            )
            .unwrap(),
        ),
        (
            BiasCategory::DoubleBarreled,
            Regex::new(r"(?i)\b(?:and|as\s+well\s+as|along\s+with)\b[^.?!]*\?").unwrap(),
        ),
        (
            BiasCategory::NegativeFraming,
            Regex::new(
                r"(?i)\b(?:what\s+(?:did|do)\s+you\s+(?:dislike|hate)|what(?:['’]s|\s+is|\s+was)\s+wrong|how\s+(?:bad|difficult|frustrating|annoying)|why\s+(?:didn['’]t|don['’]t|doesn['’]t|wouldn['’]t|can['’]t)|what\s+problems?|fail(?:ed|s|ure)?\b|not\s+(?:like|enjoy|satisfied|happy))",
            )
            .unwrap(),
        ),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_follows_declared_order() {
        let order: Vec<BiasCategory> = BIAS_RULES.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, BiasCategory::ALL.to_vec());
    }

    #[test]
    fn test_leading_patterns() {
        assert!(BiasCategory::Leading.matches("Don't you think this is great?"));
        assert!(BiasCategory::Leading.matches("Wouldn’t you prefer the new layout?"));
        assert!(BiasCategory::Leading.matches("Do you agree the checkout is faster?"));
        assert!(!BiasCategory::Leading.matches("How would you describe the checkout?"));
        assert!(!BiasCategory::Leading.matches("How would you rate the clearlyst plan?"));
        assert!(!BiasCategory::Leading.matches("Is the surelyne route faster?"));
    }

    #[test]
    fn test_absolute_patterns() {
        assert!(BiasCategory::Absolute.matches("Do you ALWAYS use the search bar?"));
        assert!(BiasCategory::Absolute.matches("Has the app never crashed for you?"));
        assert!(!BiasCategory::Absolute.matches("How often do you use search?"));
    }

    #[test]
    fn test_loaded_language_patterns() {
        assert!(BiasCategory::LoadedLanguage.matches("How terrible was the onboarding?"));
        assert!(!BiasCategory::LoadedLanguage.matches("How was the onboarding?"));
        // word boundaries keep substrings from matching
        assert!(!BiasCategory::LoadedLanguage.matches("Describe the badge design."));
    }

    #[test]
    fn test_double_barreled_patterns() {
        assert!(BiasCategory::DoubleBarreled
            .matches("How satisfied are you with the price and the quality?"));
        assert!(!BiasCategory::DoubleBarreled.matches("How satisfied are you with the price?"));
        // conjunction outside the question sentence
        assert!(!BiasCategory::DoubleBarreled.matches("Cats and dogs. Which do you prefer?"));
    }

    #[test]
    fn test_negative_framing_patterns() {
        assert!(BiasCategory::NegativeFraming.matches("What did you dislike about the tool?"));
        assert!(BiasCategory::NegativeFraming.matches("Why didn't the export work for you?"));
        assert!(!BiasCategory::NegativeFraming.matches("What did you think of the tool?"));
    }

    #[test]
    fn test_names_and_display() {
        assert_eq!(BiasCategory::LoadedLanguage.name(), "Loaded Language");
        assert_eq!(BiasCategory::DoubleBarreled.to_string(), "Double-barreled");
        assert_eq!(
            serde_json::to_string(&BiasCategory::NegativeFraming).unwrap(),
            "\"Negative Framing\""
        );
    }
}
