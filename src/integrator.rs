//! Common interface of the integrators.

use crate::{Config, Error, Float, ODE, Statistics};

/// Name, stage count and order of an integration method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegratorInfo {
    pub name: &'static str,
    pub stages: usize,
    pub order: usize,
}

/// An adaptive integrator for `y' = f(t, y)`.
///
/// Integrators only hold immutable method data; every call to
/// [`Integrator::integrate`] owns its own run state, so one integrator can be
/// shared between threads.
///
/// The right-hand side must be `Sync` even for serial runs, because peer
/// stages may be evaluated in parallel, see [`crate::Config::parallel`].
/// Interior mutability therefore has to go through atomics or locks, e.g. an
/// `AtomicUsize` call counter instead of a `Cell`.
pub trait Integrator {
    fn info(&self) -> IntegratorInfo;

    /// Integrate from `t0` to `t_end`, advancing `y` in-place.
    ///
    /// On success `y` holds the solution at `Statistics::current_time`.
    /// Numerical failures return the statistics gathered so far inside the
    /// error; `y` then holds the last accepted solution.
    fn integrate<F>(
        &self,
        f: &F,
        t0: Float,
        t_end: Float,
        y: &mut [Float],
        config: &Config,
    ) -> Result<Statistics, Error>
    where
        F: ODE + Sync;
}
