//! Sample-size report: everything the calculator page shows for one query.
//!
//! Bundles the estimated confidence level, a plain-language explanation, the
//! total fieldwork cost and a coverage table comparing the collected sample
//! against the size required at the common reporting levels.

use serde::{Deserialize, Serialize};

use crate::confidence::{estimate_confidence, ConfidenceLevel};
use crate::error::{Result, StatsError};
use crate::sample_size::{default_finite_correction, default_proportion, required_sample_size};

/// Levels listed in the coverage table.
pub const REPORTING_LEVELS: [ConfidenceLevel; 3] = [
    ConfidenceLevel::P85,
    ConfidenceLevel::P90,
    ConfidenceLevel::P95,
];

/// Inputs for a confidence estimate of an existing sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSizeQuery {
    pub population_size: u64,
    pub sample_size: u64,
    pub margin_target: f64,
    #[serde(default = "default_proportion")]
    pub assumed_proportion: f64,
    #[serde(default = "default_finite_correction")]
    pub use_finite_correction: bool,
    /// Cost of collecting one response, in any currency
    #[serde(default)]
    pub cost_per_response: f64,
}

impl SampleSizeQuery {
    pub fn new(population_size: u64, sample_size: u64, margin_target: f64) -> Self {
        Self {
            population_size,
            sample_size,
            margin_target,
            assumed_proportion: default_proportion(),
            use_finite_correction: default_finite_correction(),
            cost_per_response: 0.0,
        }
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        estimate_confidence(
            self.sample_size,
            self.population_size,
            self.margin_target,
            self.assumed_proportion,
        )
    }

    /// Build the full report.
    ///
    /// The confidence estimate never fails; the coverage table needs a
    /// positive margin, so that is checked here. An empty population has no
    /// coverage table.
    pub fn report(&self) -> Result<SampleSizeReport> {
        if !(self.cost_per_response.is_finite() && self.cost_per_response >= 0.0) {
            return Err(StatsError::InvalidArgument(format!(
                "cost per response must be zero or more, got {}",
                self.cost_per_response
            )));
        }

        let coverage = if self.population_size == 0 {
            Vec::new()
        } else {
            REPORTING_LEVELS
                .iter()
                .map(|&level| self.coverage_row(level))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(SampleSizeReport {
            confidence_level: self.confidence(),
            explanation: explain_sample(self.sample_size, self.population_size),
            total_cost: self.cost_per_response * self.sample_size as f64,
            coverage,
        })
    }

    fn coverage_row(&self, level: ConfidenceLevel) -> Result<CoverageRow> {
        let z = level.z_value().ok_or_else(|| {
            StatsError::InvalidArgument("coverage needs a tabulated level".to_string())
        })?;
        let required = required_sample_size(
            self.margin_target,
            z,
            self.population_size,
            self.assumed_proportion,
            self.use_finite_correction,
        )?;

        Ok(CoverageRow {
            level: level.label(),
            required,
            met: self.sample_size >= required,
            percent_of_required: self.sample_size as f64 / required as f64 * 100.0,
        })
    }
}

/// One line of the coverage table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    pub level: &'static str,
    pub required: u64,
    pub met: bool,
    pub percent_of_required: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSizeReport {
    pub confidence_level: ConfidenceLevel,
    pub explanation: String,
    pub total_cost: f64,
    pub coverage: Vec<CoverageRow>,
}

/// Plain-language explanation of what the sample supports.
pub fn explain_sample(sample_size: u64, population_size: u64) -> String {
    if sample_size == 0 {
        return "You need at least one response to calculate a confidence interval.".to_string();
    }
    if sample_size > population_size {
        return "Sample size cannot exceed the population size.".to_string();
    }

    format!(
        "With a sample size of {}, the app estimates how confident you can be that your \
         survey results reflect the views of the full population of {} people. Larger sample \
         sizes reduce uncertainty and give you a tighter margin of error.",
        sample_size, population_size
    )
}
