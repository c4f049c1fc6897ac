//! Errors for integration methods

use thiserror::Error;

use crate::{Float, stats::Statistics};

/// Errors reported by the integrators.
///
/// Numerical failures carry the statistics gathered up to the point of
/// failure, so callers can inspect the time reached and the work spent.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("unknown integration method `{0}`")]
    UnknownMethod(String),
    #[error("the state vector must have at least one component")]
    EmptySystem,
    #[error("t_end must be greater than t0 (got t0 = {t0}, t_end = {t_end})")]
    InvalidTimeSpan { t0: Float, t_end: Float },
    #[error("block size {block_size} exceeds the system dimension {n}")]
    InvalidBlockSize { block_size: usize, n: usize },
    #[error("step size too small at t = {}", .0.current_time)]
    StepSizeTooSmall(Statistics),
    #[error("maximum step count exceeded at t = {}", .0.current_time)]
    MaxStepCountExceeded(Statistics),
    #[error("error during startup: {source}")]
    Startup {
        stats: Statistics,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Statistics of the failed run, if the error happened while integrating.
    pub fn statistics(&self) -> Option<&Statistics> {
        match self {
            Error::StepSizeTooSmall(stats) | Error::MaxStepCountExceeded(stats) => Some(stats),
            Error::Startup { stats, .. } => Some(stats),
            _ => None,
        }
    }
}
