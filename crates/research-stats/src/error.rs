use thiserror::Error;

/// Errors raised by the statistics functions.
///
/// Degenerate but well-formed input (an empty sample, zero pooled variance)
/// is not an error: those cases return sentinel results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
