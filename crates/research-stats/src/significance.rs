//! Two-proportion z-test for comparing success rates of two groups.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Default critical value (two-tailed, ~95%)
pub const DEFAULT_THRESHOLD: f64 = 1.96;

/// Success counts for two groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoProportionQuery {
    pub successes_a: u64,
    pub total_a: u64,
    pub successes_b: u64,
    pub total_b: u64,
}

impl TwoProportionQuery {
    pub fn new(successes_a: u64, total_a: u64, successes_b: u64, total_b: u64) -> Self {
        Self {
            successes_a,
            total_a,
            successes_b,
            total_b,
        }
    }

    /// Run the test against `threshold`.
    pub fn test(&self, threshold: f64) -> Result<SignificanceResult> {
        test_significance(
            self.successes_a,
            self.total_a,
            self.successes_b,
            self.total_b,
            threshold,
        )
    }

    fn validate(&self) -> Result<()> {
        if self.total_a == 0 || self.total_b == 0 {
            return Err(StatsError::InvalidArgument(
                "each group needs at least one participant".to_string(),
            ));
        }
        if self.successes_a > self.total_a {
            return Err(StatsError::InvalidArgument(format!(
                "group A successes ({}) exceed its total ({})",
                self.successes_a, self.total_a
            )));
        }
        if self.successes_b > self.total_b {
            return Err(StatsError::InvalidArgument(format!(
                "group B successes ({}) exceed its total ({})",
                self.successes_b, self.total_b
            )));
        }
        Ok(())
    }
}

/// Outcome of a two-proportion z-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignificanceResult {
    pub z_score: f64,
    pub rate_a: f64,
    pub rate_b: f64,
    pub is_significant: bool,
    /// Critical value the z-score was compared against
    pub threshold: f64,
    /// Pooled variance was zero, so no difference is measurable
    pub degenerate: bool,
}

impl SignificanceResult {
    pub fn tier(&self) -> SignificanceTier {
        SignificanceTier::from_z(self.z_score)
    }

    pub fn comparison(&self) -> RateComparison {
        RateComparison::new(self.rate_a, self.rate_b)
    }
}

/// Pooled two-proportion z-test.
///
/// `z = (p̂A - p̂B) / sqrt(p(1-p)(1/nA + 1/nB))` where `p` is the pooled
/// success rate. When the pooled rate is exactly 0 or 1 the standard error
/// vanishes; the result is then `z = 0` and not significant.
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] if either total is zero, successes exceed
/// their total, or `threshold` is not a positive finite number.
///
/// # Examples
///
/// ```
/// use research_stats::significance::test_significance;
///
/// let result = test_significance(70, 100, 50, 100, 1.96).unwrap();
/// assert!(result.is_significant);
/// assert!((result.z_score - 2.887).abs() < 1e-3);
/// ```
pub fn test_significance(
    successes_a: u64,
    total_a: u64,
    successes_b: u64,
    total_b: u64,
    threshold: f64,
) -> Result<SignificanceResult> {
    let query = TwoProportionQuery::new(successes_a, total_a, successes_b, total_b);
    query.validate()?;

    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(StatsError::InvalidArgument(format!(
            "threshold must be a positive number, got {}",
            threshold
        )));
    }

    let n_a = total_a as f64;
    let n_b = total_b as f64;
    let rate_a = successes_a as f64 / n_a;
    let rate_b = successes_b as f64 / n_b;
    let pooled = (successes_a as f64 + successes_b as f64) / (n_a + n_b);
    let se = (pooled * (1.0 - pooled) * (1.0 / n_a + 1.0 / n_b)).sqrt();

    if se == 0.0 {
        return Ok(SignificanceResult {
            z_score: 0.0,
            rate_a,
            rate_b,
            is_significant: false,
            threshold,
            degenerate: true,
        });
    }

    let z_score = (rate_a - rate_b) / se;

    Ok(SignificanceResult {
        z_score,
        rate_a,
        rate_b,
        is_significant: z_score.abs() > threshold,
        threshold,
        degenerate: false,
    })
}

/// Two-tailed critical value for the confidence levels offered to users.
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] for any level other than 0.90, 0.95, 0.98
/// or 0.99.
pub fn critical_value(confidence: f64) -> Result<f64> {
    const LEVELS: [(f64, f64); 4] = [(0.90, 1.645), (0.95, 1.96), (0.98, 2.33), (0.99, 2.576)];

    LEVELS
        .iter()
        .find(|(level, _)| (level - confidence).abs() < 1e-9)
        .map(|&(_, z)| z)
        .ok_or_else(|| {
            StatsError::InvalidArgument(format!(
                "unsupported confidence level {}; use 0.90, 0.95, 0.98 or 0.99",
                confidence
            ))
        })
}

/// Advisory wording for how strong a difference is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceTier {
    NotSignificant,
    Significant95,
    Significant98,
    VerySignificant,
    HighlySignificant,
}

impl SignificanceTier {
    /// Classify `|z|` at the 1.96 / 2.33 / 2.58 / 3.0 breakpoints.
    pub fn from_z(z: f64) -> Self {
        let z = z.abs();
        if z > 3.0 {
            SignificanceTier::HighlySignificant
        } else if z > 2.58 {
            SignificanceTier::VerySignificant
        } else if z > 2.33 {
            SignificanceTier::Significant98
        } else if z > 1.96 {
            SignificanceTier::Significant95
        } else {
            SignificanceTier::NotSignificant
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SignificanceTier::HighlySignificant => "This is a highly significant difference.",
            SignificanceTier::VerySignificant => "This is a very significant difference.",
            SignificanceTier::Significant98 => {
                "This is a significant difference at the 98% confidence level."
            }
            SignificanceTier::Significant95 => {
                "This is a significant difference at the 95% confidence level."
            }
            SignificanceTier::NotSignificant => {
                "This result is not statistically significant at standard confidence levels."
            }
        }
    }
}

/// Which group came out ahead, and by how many percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "leader", rename_all = "snake_case")]
pub enum RateComparison {
    GroupA { points: f64 },
    GroupB { points: f64 },
    Equal,
}

impl RateComparison {
    pub fn new(rate_a: f64, rate_b: f64) -> Self {
        if rate_a > rate_b {
            RateComparison::GroupA {
                points: (rate_a - rate_b) * 100.0,
            }
        } else if rate_b > rate_a {
            RateComparison::GroupB {
                points: (rate_b - rate_a) * 100.0,
            }
        } else {
            RateComparison::Equal
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RateComparison::GroupA { points } => format!(
                "Group 1 had a higher success rate than Group 2 by {:.1}%.",
                points
            ),
            RateComparison::GroupB { points } => format!(
                "Group 2 had a higher success rate than Group 1 by {:.1}%.",
                points
            ),
            RateComparison::Equal => "Both groups had the same success rate.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_rates_not_significant() {
        let result = test_significance(50, 100, 50, 100, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(result.z_score, 0.0);
        assert!(!result.is_significant);
        assert!(!result.degenerate);
    }

    #[test]
    fn test_clear_difference_is_significant() {
        let result = test_significance(70, 100, 50, 100, DEFAULT_THRESHOLD).unwrap();
        assert!(result.is_significant);
        assert!(result.z_score > 2.85 && result.z_score < 2.92);
        assert_eq!(result.rate_a, 0.7);
        assert_eq!(result.rate_b, 0.5);
    }

    #[test]
    fn test_sign_follows_group_order() {
        let forward = test_significance(70, 100, 50, 100, DEFAULT_THRESHOLD).unwrap();
        let reverse = test_significance(50, 100, 70, 100, DEFAULT_THRESHOLD).unwrap();
        assert!((forward.z_score + reverse.z_score).abs() < 1e-12);
        assert!(reverse.is_significant);
    }

    #[test]
    fn test_threshold_controls_verdict() {
        let strict = test_significance(70, 100, 50, 100, 3.0).unwrap();
        assert!(!strict.is_significant);
        assert_eq!(strict.threshold, 3.0);
    }

    #[test]
    fn test_all_successes_is_degenerate() {
        let result = test_significance(40, 40, 60, 60, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(result.z_score, 0.0);
        assert!(!result.is_significant);
        assert!(result.degenerate);
    }

    #[test]
    fn test_no_successes_is_degenerate() {
        let result = test_significance(0, 10, 0, 20, DEFAULT_THRESHOLD).unwrap();
        assert!(result.degenerate);
        assert_eq!(result.rate_a, 0.0);
    }

    #[test]
    fn test_rejects_zero_totals() {
        assert!(matches!(
            test_significance(0, 0, 5, 10, DEFAULT_THRESHOLD),
            Err(StatsError::InvalidArgument(_))
        ));
        assert!(test_significance(5, 10, 0, 0, DEFAULT_THRESHOLD).is_err());
    }

    #[test]
    fn test_rejects_successes_over_total() {
        assert!(test_significance(11, 10, 5, 10, DEFAULT_THRESHOLD).is_err());
        assert!(test_significance(5, 10, 11, 10, DEFAULT_THRESHOLD).is_err());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(test_significance(5, 10, 5, 10, 0.0).is_err());
        assert!(test_significance(5, 10, 5, 10, f64::NAN).is_err());
    }

    #[test]
    fn test_critical_values() {
        assert_eq!(critical_value(0.90), Ok(1.645));
        assert_eq!(critical_value(0.95), Ok(1.96));
        assert_eq!(critical_value(0.98), Ok(2.33));
        assert_eq!(critical_value(0.99), Ok(2.576));
        assert!(critical_value(0.5).is_err());
    }

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(SignificanceTier::from_z(1.96), SignificanceTier::NotSignificant);
        assert_eq!(SignificanceTier::from_z(2.0), SignificanceTier::Significant95);
        assert_eq!(SignificanceTier::from_z(-2.4), SignificanceTier::Significant98);
        assert_eq!(SignificanceTier::from_z(2.9), SignificanceTier::VerySignificant);
        assert_eq!(SignificanceTier::from_z(3.5), SignificanceTier::HighlySignificant);
    }

    #[test]
    fn test_tier_of_result() {
        let result = test_significance(70, 100, 50, 100, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(result.tier(), SignificanceTier::VerySignificant);
        assert_eq!(
            result.tier().description(),
            "This is a very significant difference."
        );
    }

    #[test]
    fn test_rate_comparison_wording() {
        let result = test_significance(70, 100, 50, 100, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(
            result.comparison().describe(),
            "Group 1 had a higher success rate than Group 2 by 20.0%."
        );
        assert_eq!(
            RateComparison::new(0.25, 0.5).describe(),
            "Group 2 had a higher success rate than Group 1 by 25.0%."
        );
        assert_eq!(RateComparison::new(0.5, 0.5), RateComparison::Equal);
    }
}
