//! Confidence-level estimation for a finished survey.
//!
//! Given how many responses were collected out of a known population, find the
//! best tabulated confidence level whose margin of error still fits inside the
//! target margin.

use serde::{Serialize, Serializer};

/// Default assumed proportion. 0.5 maximises `p(1-p)` and so gives the most
/// conservative margin.
pub const DEFAULT_PROPORTION: f64 = 0.5;

/// Tabulated confidence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// No tabulated level qualifies (or the input was degenerate)
    None,
    P80,
    P85,
    P90,
    P95,
    P99,
}

impl ConfidenceLevel {
    /// Every level that has a z-value, in ascending order.
    pub const TABULATED: [ConfidenceLevel; 5] = [
        ConfidenceLevel::P80,
        ConfidenceLevel::P85,
        ConfidenceLevel::P90,
        ConfidenceLevel::P95,
        ConfidenceLevel::P99,
    ];

    /// Confidence as a fraction (`0.0` for [`ConfidenceLevel::None`]).
    pub fn as_f64(self) -> f64 {
        match self {
            ConfidenceLevel::None => 0.0,
            ConfidenceLevel::P80 => 0.80,
            ConfidenceLevel::P85 => 0.85,
            ConfidenceLevel::P90 => 0.90,
            ConfidenceLevel::P95 => 0.95,
            ConfidenceLevel::P99 => 0.99,
        }
    }

    /// Canonical two-tailed z-value for the level.
    pub fn z_value(self) -> Option<f64> {
        match self {
            ConfidenceLevel::None => None,
            ConfidenceLevel::P80 => Some(1.28),
            ConfidenceLevel::P85 => Some(1.44),
            ConfidenceLevel::P90 => Some(1.645),
            ConfidenceLevel::P95 => Some(1.96),
            ConfidenceLevel::P99 => Some(2.576),
        }
    }

    /// Label used in tables, e.g. `"95%"`.
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::None => "0%",
            ConfidenceLevel::P80 => "80%",
            ConfidenceLevel::P85 => "85%",
            ConfidenceLevel::P90 => "90%",
            ConfidenceLevel::P95 => "95%",
            ConfidenceLevel::P99 => "99%",
        }
    }

    pub fn is_none(self) -> bool {
        self == ConfidenceLevel::None
    }
}

impl Serialize for ConfidenceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Finite-population-corrected margin of error.
///
/// `z * sqrt(p(1-p)/n) * sqrt((N-n)/(N-1))`
///
/// # Returns
///
/// * `Some(moe)` - The margin of error
/// * `None` - If `n == 0`, `n > N`, or `N <= 1` (the correction term is undefined)
///
/// # Examples
///
/// ```
/// use research_stats::confidence::margin_of_error;
///
/// let moe = margin_of_error(1.96, 278, 1000, 0.5).unwrap();
/// assert!(moe <= 0.05);
/// assert_eq!(margin_of_error(1.96, 0, 1000, 0.5), None);
/// ```
pub fn margin_of_error(z: f64, sample_size: u64, population_size: u64, p: f64) -> Option<f64> {
    if sample_size == 0 || population_size <= 1 || sample_size > population_size {
        return None;
    }

    let n = sample_size as f64;
    let big_n = population_size as f64;
    let sampling = (p * (1.0 - p) / n).sqrt();
    let correction = ((big_n - n) / (big_n - 1.0)).sqrt();

    Some(z * sampling * correction)
}

/// Highest tabulated confidence level whose margin of error fits `margin_target`.
///
/// Returns [`ConfidenceLevel::None`] when the sample is empty, exceeds the
/// population, the population has a single member, or no level qualifies.
///
/// When several levels qualify the highest confidence wins, i.e. this reports
/// the best confidence achievable within the margin budget.
///
/// # Examples
///
/// ```
/// use research_stats::confidence::{estimate_confidence, ConfidenceLevel};
///
/// assert_eq!(estimate_confidence(278, 1000, 0.05, 0.5), ConfidenceLevel::P95);
/// assert_eq!(estimate_confidence(0, 1000, 0.05, 0.5), ConfidenceLevel::None);
/// ```
pub fn estimate_confidence(
    sample_size: u64,
    population_size: u64,
    margin_target: f64,
    p: f64,
) -> ConfidenceLevel {
    ConfidenceLevel::TABULATED
        .iter()
        .copied()
        .filter(|level| {
            level
                .z_value()
                .and_then(|z| margin_of_error(z, sample_size, population_size, p))
                .is_some_and(|moe| moe <= margin_target)
        })
        .max()
        .unwrap_or(ConfidenceLevel::None)
}
