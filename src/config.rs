//! Configuration of the integrators and the resolution of its defaults.

use bon::Builder;

use crate::{Error, Float};

/// Tolerances and limits for an integration run.
///
/// Every field is optional. A field that is unset, or set to a non-positive
/// value, takes its default when the configuration is resolved for a run:
///
/// | field | default |
/// |---|---|
/// | `initial_step_size` | heuristic estimate, see [`crate::hinit`] |
/// | `min_step_size` | `1e-10` |
/// | `max_step_size` | `t_end - t0` |
/// | `absolute_tolerance` | `1e-4` |
/// | `relative_tolerance` | the absolute tolerance |
/// | `max_step_count` | `1_000_000` |
/// | `block_size` | system dimension |
///
/// # Example
///
/// ```ignore
/// let config = Config::builder()
///     .absolute_tolerance(1e-6)
///     .relative_tolerance(1e-6)
///     .build();
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct Config {
    /// Size of the first integration step.
    pub initial_step_size: Option<Float>,
    /// Smallest step the controller may propose after a rejection
    /// before the run fails.
    pub min_step_size: Option<Float>,
    /// Largest step the controller may take.
    pub max_step_size: Option<Float>,
    /// Absolute error tolerance.
    pub absolute_tolerance: Option<Float>,
    /// Relative error tolerance.
    pub relative_tolerance: Option<Float>,
    /// Maximum number of attempted steps.
    pub max_step_count: Option<usize>,
    /// Stop after the first accepted step.
    #[builder(default)]
    pub one_step_only: bool,
    /// Number of components per blocked evaluation.
    /// Ignored unless the right-hand side supports blocked evaluation.
    pub block_size: Option<usize>,
    /// Evaluate peer stages (and blocks) in parallel with rayon.
    #[builder(default)]
    pub parallel: bool,
}

/// A [`Config`] with every default applied for one specific run.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub initial_step_size: Option<Float>,
    pub min_step_size: Float,
    pub max_step_size: Float,
    pub absolute_tolerance: Float,
    pub relative_tolerance: Float,
    pub max_step_count: usize,
    pub one_step_only: bool,
    pub block_size: usize,
    pub parallel: bool,
}

impl Config {
    /// Apply the defaults for a run over `[t0, t_end]` of a system of
    /// dimension `n`. `blocked` tells whether the right-hand side supports
    /// blocked evaluation. The configuration itself is left untouched.
    pub fn resolve(
        &self,
        t0: Float,
        t_end: Float,
        n: usize,
        blocked: bool,
    ) -> Result<ResolvedConfig, Error> {
        if n == 0 {
            return Err(Error::EmptySystem);
        }
        if !(t_end > t0) {
            return Err(Error::InvalidTimeSpan { t0, t_end });
        }

        let absolute_tolerance = positive(self.absolute_tolerance).unwrap_or(1e-4);
        let relative_tolerance = positive(self.relative_tolerance).unwrap_or(absolute_tolerance);

        let block_size = match self.block_size.filter(|&b| b > 0) {
            _ if !blocked => n,
            Some(b) if b > n => return Err(Error::InvalidBlockSize { block_size: b, n }),
            Some(b) => b,
            None => n,
        };

        Ok(ResolvedConfig {
            initial_step_size: positive(self.initial_step_size),
            min_step_size: positive(self.min_step_size).unwrap_or(1e-10),
            max_step_size: positive(self.max_step_size).unwrap_or(t_end - t0),
            absolute_tolerance,
            relative_tolerance,
            max_step_count: self.max_step_count.filter(|&m| m > 0).unwrap_or(1_000_000),
            one_step_only: self.one_step_only,
            block_size,
            parallel: self.parallel,
        })
    }
}

fn positive(value: Option<Float>) -> Option<Float> {
    value.filter(|&v| v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::Error;

    #[test]
    fn defaults_are_applied_to_unset_fields() {
        let resolved = Config::default().resolve(1.0, 3.0, 4, false).unwrap();
        assert_eq!(resolved.initial_step_size, None);
        assert_eq!(resolved.min_step_size, 1e-10);
        assert_eq!(resolved.max_step_size, 2.0);
        assert_eq!(resolved.absolute_tolerance, 1e-4);
        assert_eq!(resolved.relative_tolerance, 1e-4);
        assert_eq!(resolved.max_step_count, 1_000_000);
        assert_eq!(resolved.block_size, 4);
        assert!(!resolved.one_step_only);
        assert!(!resolved.parallel);
    }

    #[test]
    fn non_positive_values_count_as_unset() {
        let config = Config::builder()
            .initial_step_size(0.0)
            .min_step_size(-1.0)
            .absolute_tolerance(0.0)
            .max_step_count(0)
            .block_size(0)
            .build();
        let resolved = config.resolve(0.0, 1.0, 10, true).unwrap();
        assert_eq!(resolved.initial_step_size, None);
        assert_eq!(resolved.min_step_size, 1e-10);
        assert_eq!(resolved.absolute_tolerance, 1e-4);
        assert_eq!(resolved.max_step_count, 1_000_000);
        assert_eq!(resolved.block_size, 10);
    }

    #[test]
    fn explicit_values_are_kept() {
        let config = Config::builder()
            .initial_step_size(0.01)
            .max_step_size(0.5)
            .absolute_tolerance(1e-6)
            .relative_tolerance(1e-3)
            .max_step_count(42)
            .one_step_only(true)
            .block_size(3)
            .parallel(true)
            .build();
        let resolved = config.resolve(0.0, 1.0, 10, true).unwrap();
        assert_eq!(resolved.initial_step_size, Some(0.01));
        assert_eq!(resolved.max_step_size, 0.5);
        assert_eq!(resolved.absolute_tolerance, 1e-6);
        assert_eq!(resolved.relative_tolerance, 1e-3);
        assert_eq!(resolved.max_step_count, 42);
        assert_eq!(resolved.block_size, 3);
        assert!(resolved.one_step_only);
        assert!(resolved.parallel);

        // resolving never mutates the caller's configuration
        assert_eq!(config.block_size, Some(3));
        assert_eq!(config.min_step_size, None);
    }

    #[test]
    fn block_size_is_forced_to_dimension_without_blocked_evaluation() {
        let config = Config::builder().block_size(3).build();
        assert_eq!(config.resolve(0.0, 1.0, 10, false).unwrap().block_size, 10);
    }

    #[test]
    fn invalid_runs_are_rejected() {
        let config = Config::builder().block_size(11).build();
        assert!(matches!(
            config.resolve(0.0, 1.0, 10, true),
            Err(Error::InvalidBlockSize { block_size: 11, n: 10 })
        ));
        assert!(matches!(
            Config::default().resolve(0.0, 1.0, 0, false),
            Err(Error::EmptySystem)
        ));
        assert!(matches!(
            Config::default().resolve(1.0, 1.0, 2, false),
            Err(Error::InvalidTimeSpan { .. })
        ));
    }
}
