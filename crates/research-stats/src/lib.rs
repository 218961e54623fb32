//! Research Stats - closed-form statistics for survey and A/B research
//!
//! This crate provides:
//! - Confidence-level estimation for a collected sample
//! - Required sample size for a target margin of error
//! - Two-proportion z-tests with advisory significance tiers
//! - A sample-size report combining the above for display
//!
//! Every function is pure and synchronous. Degenerate input (an empty
//! sample, zero pooled variance) yields a sentinel result; malformed input
//! yields [`StatsError::InvalidArgument`].
//!
//! # Examples
//!
//! ```
//! use research_stats::{estimate_confidence, required_sample_size, test_significance};
//! use research_stats::ConfidenceLevel;
//!
//! let needed = required_sample_size(0.05, 1.96, 1000, 0.5, true).unwrap();
//! assert_eq!(needed, 278);
//! assert_eq!(estimate_confidence(needed, 1000, 0.05, 0.5), ConfidenceLevel::P95);
//!
//! let ab = test_significance(70, 100, 50, 100, 1.96).unwrap();
//! assert!(ab.is_significant);
//! ```

pub mod confidence;
pub mod error;
pub mod report;
pub mod sample_size;
pub mod significance;

// Re-export main types and functions
pub use confidence::{estimate_confidence, margin_of_error, ConfidenceLevel, DEFAULT_PROPORTION};
pub use error::StatsError;
pub use report::{explain_sample, CoverageRow, SampleSizeQuery, SampleSizeReport};
pub use sample_size::{required_sample_size, RequiredSizeQuery};
pub use significance::{
    critical_value, test_significance, RateComparison, SignificanceResult, SignificanceTier,
    TwoProportionQuery, DEFAULT_THRESHOLD,
};
