//! Required sample size for a target margin of error.

use serde::{Deserialize, Serialize};

use crate::confidence::DEFAULT_PROPORTION;
use crate::error::{Result, StatsError};

/// Inputs for [`required_sample_size`], as accepted over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredSizeQuery {
    pub margin_target: f64,
    pub z_score: f64,
    pub population_size: u64,
    #[serde(default = "default_proportion")]
    pub assumed_proportion: f64,
    #[serde(default = "default_finite_correction")]
    pub use_finite_correction: bool,
}

pub(crate) fn default_proportion() -> f64 {
    DEFAULT_PROPORTION
}

pub(crate) fn default_finite_correction() -> bool {
    true
}

impl RequiredSizeQuery {
    pub fn solve(&self) -> Result<u64> {
        required_sample_size(
            self.margin_target,
            self.z_score,
            self.population_size,
            self.assumed_proportion,
            self.use_finite_correction,
        )
    }
}

/// Smallest sample that keeps the margin of error within `margin`.
///
/// Base size `n0 = z² p(1-p) / margin²`; with `finite_correction` it is
/// shrunk to `n0 / (1 + (n0 - 1) / N)`. The result is always rounded up and
/// is at least 1.
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] if `margin` or `z` is not a positive finite
/// number, `population_size` is zero, or `p` lies outside `(0, 1)`.
///
/// # Examples
///
/// ```
/// use research_stats::sample_size::required_sample_size;
///
/// assert_eq!(required_sample_size(0.05, 1.96, 1000, 0.5, true).unwrap(), 278);
/// assert_eq!(required_sample_size(0.05, 1.96, 1000, 0.5, false).unwrap(), 385);
/// ```
pub fn required_sample_size(
    margin: f64,
    z: f64,
    population_size: u64,
    p: f64,
    finite_correction: bool,
) -> Result<u64> {
    if !(margin.is_finite() && margin > 0.0) {
        return Err(StatsError::InvalidArgument(format!(
            "margin must be a positive number, got {}",
            margin
        )));
    }
    if !(z.is_finite() && z > 0.0) {
        return Err(StatsError::InvalidArgument(format!(
            "z-score must be a positive number, got {}",
            z
        )));
    }
    if population_size == 0 {
        return Err(StatsError::InvalidArgument(
            "population size must be at least 1".to_string(),
        ));
    }
    if !(p > 0.0 && p < 1.0) {
        return Err(StatsError::InvalidArgument(format!(
            "assumed proportion must lie strictly between 0 and 1, got {}",
            p
        )));
    }

    let n0 = z.powi(2) * p * (1.0 - p) / margin.powi(2);
    if !n0.is_finite() || n0 >= u64::MAX as f64 {
        return Err(StatsError::InvalidArgument(format!(
            "margin {} is too small to size a sample",
            margin
        )));
    }

    if finite_correction {
        let n = n0 / (1.0 + (n0 - 1.0) / population_size as f64);
        // Corrected size is bounded by N; clamp away rounding noise at the edge
        Ok((n.ceil() as u64).clamp(1, population_size))
    } else {
        Ok((n0.ceil() as u64).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_value_with_correction() {
        assert_eq!(required_sample_size(0.05, 1.96, 1000, 0.5, true), Ok(278));
    }

    #[test]
    fn test_reference_value_without_correction() {
        // 1.96² * 0.25 / 0.0025 = 384.16
        assert_eq!(required_sample_size(0.05, 1.96, 1000, 0.5, false), Ok(385));
    }

    #[test]
    fn test_correction_never_exceeds_population() {
        let n = required_sample_size(0.01, 2.576, 50, 0.5, true).unwrap();
        assert!(n <= 50);
    }

    #[test]
    fn test_rejects_margin_that_underflows() {
        assert!(matches!(
            required_sample_size(1e-170, 1.96, 1000, 0.5, true),
            Err(StatsError::InvalidArgument(_))
        ));
        assert!(matches!(
            required_sample_size(1e-170, 1.96, 1000, 0.5, false),
            Err(StatsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_tiny_margin_needs_whole_population() {
        assert_eq!(required_sample_size(1e-9, 1.96, 1000, 0.5, true), Ok(1000));
    }

    #[test]
    fn test_single_member_population() {
        assert_eq!(required_sample_size(0.05, 1.96, 1, 0.5, true), Ok(1));
    }

    #[test]
    fn test_wide_margin_still_needs_one_response() {
        assert_eq!(required_sample_size(0.99, 1.28, 1000, 0.5, true), Ok(1));
    }

    #[test]
    fn test_skewed_proportion_needs_fewer() {
        let even = required_sample_size(0.05, 1.96, 10_000, 0.5, true).unwrap();
        let skewed = required_sample_size(0.05, 1.96, 10_000, 0.1, true).unwrap();
        assert!(skewed < even);
    }

    #[test]
    fn test_rejects_non_positive_margin() {
        assert!(matches!(
            required_sample_size(0.0, 1.96, 1000, 0.5, true),
            Err(StatsError::InvalidArgument(_))
        ));
        assert!(required_sample_size(-0.05, 1.96, 1000, 0.5, true).is_err());
        assert!(required_sample_size(f64::NAN, 1.96, 1000, 0.5, true).is_err());
    }

    #[test]
    fn test_rejects_empty_population() {
        assert!(matches!(
            required_sample_size(0.05, 1.96, 0, 0.5, true),
            Err(StatsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_bad_z_and_proportion() {
        assert!(required_sample_size(0.05, 0.0, 1000, 0.5, true).is_err());
        assert!(required_sample_size(0.05, 1.96, 1000, 0.0, true).is_err());
        assert!(required_sample_size(0.05, 1.96, 1000, 1.0, true).is_err());
    }

    #[test]
    fn test_query_defaults() {
        let query: RequiredSizeQuery = serde_json::from_str(
            r#"{"margin_target": 0.05, "z_score": 1.96, "population_size": 1000}"#,
        )
        .unwrap();
        assert_eq!(query.assumed_proportion, 0.5);
        assert!(query.use_finite_correction);
        assert_eq!(query.solve(), Ok(278));
    }
}
