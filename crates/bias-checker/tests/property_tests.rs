//! Property-based tests for the bias matcher

use bias_checker::{match_bias_patterns, BiasCategory, BiasCheckResult};
use proptest::prelude::*;

/// Position of a category in the rule table
fn rank(category: BiasCategory) -> usize {
    BiasCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap()
}

fn neutral_question() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("How would you describe the checkout?".to_string()),
        Just("What did you think of the onboarding?".to_string()),
        Just("How often do you use the search bar?".to_string()),
        Just("Which feature do you use most?".to_string()),
    ]
}

fn biased_phrase() -> impl Strategy<Value = (BiasCategory, &'static str)> {
    prop_oneof![
        Just((BiasCategory::Leading, "Don't you think")),
        Just((BiasCategory::Absolute, "always")),
        Just((BiasCategory::LoadedLanguage, "terrible")),
        Just((BiasCategory::NegativeFraming, "What did you dislike")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn matcher_never_panics(text in ".{0,300}") {
        let _ = match_bias_patterns(&text);
    }

    #[test]
    fn types_follow_rule_order_without_duplicates(text in "[a-zA-Z' ,?.]{0,200}") {
        let m = match_bias_patterns(&text);
        let ranks: Vec<usize> = m.types.iter().map(|c| rank(*c)).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn suggestion_comes_from_first_match(text in "[a-zA-Z' ,?.]{0,200}") {
        let m = match_bias_patterns(&text);
        match m.primary() {
            Some(first) => prop_assert_eq!(m.suggestion.as_str(), first.suggestion()),
            None => prop_assert!(m.suggestion.is_empty()),
        }
    }

    #[test]
    fn wire_result_agrees_with_match(text in "[a-zA-Z' ,?.]{0,200}") {
        let m = match_bias_patterns(&text);
        let detected = m.bias_detected();
        let count = m.types.len();
        let result: BiasCheckResult = m.into();
        prop_assert_eq!(result.bias_detected, detected);
        prop_assert_eq!(result.bias_types.len(), count);
    }

    #[test]
    fn neutral_questions_stay_clean(question in neutral_question()) {
        prop_assert!(!match_bias_patterns(&question).bias_detected());
    }

    #[test]
    fn matching_ignores_case(
        (category, phrase) in biased_phrase(),
        upper in any::<bool>()
    ) {
        let phrase = if upper { phrase.to_uppercase() } else { phrase.to_lowercase() };
        let text = format!("{} about the new dashboard", phrase);
        prop_assert!(match_bias_patterns(&text).types.contains(&category));
    }
}

#[test]
fn leading_question_is_flagged() {
    let m = match_bias_patterns("Don't you think this is obviously bad?");
    assert_eq!(m.types.first(), Some(&BiasCategory::Leading));
    assert_eq!(m.suggestion, "Try rephrasing as an open-ended question.");
}
