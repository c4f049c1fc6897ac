//! Explicit peer methods with variable step-size ratios.
//!
//! A peer method carries `S` stage values from step to step, all of the same
//! order. A step of size `h` following an accepted step of size `hp` computes
//! every new stage from the old stages and their derivatives only, with
//! coefficients depending on the ratio `sigma = h / hp`:
//!
//! ```text
//! Y_new = B Y_old + hp A(sigma) F_old,   F_new[i] = f(t + h c_i, Y_new[i])
//! ```
//!
//! The stage evaluations of one step are independent of each other and may
//! run in parallel, see [`crate::Config::parallel`].

mod coefficients;
mod method;
mod run;
mod startup;

pub use coefficients::PeerCoefficients;
pub use method::PeerMethod;

use crate::{Config, Error, Float, Integrator, IntegratorInfo, ODE, Statistics, Status};

use run::RunState;

/// Integrator for an explicit peer method of the catalog.
///
/// # Example
///
/// ```ignore
/// let peer = Peer::from_name("EPP6j1")?;
/// let stats = peer.integrate(&problem, 0.0, 1.0, &mut y, &Config::default())?;
/// println!("{} steps, {} rejected", stats.step_count, stats.rejected_count);
/// ```
#[derive(Clone, Debug)]
pub struct Peer {
    coeffs: PeerCoefficients,
}

impl Peer {
    /// Peer integrator for `method` with error-model blending disabled.
    pub fn new(method: PeerMethod) -> Self {
        Self {
            coeffs: PeerCoefficients::new(method),
        }
    }

    /// Peer integrator for `method` using the blending parameter `a` of the
    /// local error model tuned for the method.
    pub fn with_error_model_blending(method: PeerMethod) -> Self {
        Self {
            coeffs: PeerCoefficients::with_error_model_blending(method),
        }
    }

    /// Look up a method by its catalog name, e.g. `"EPP8_d"`.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        name.parse().map(Self::new)
    }

    pub fn method(&self) -> PeerMethod {
        self.coeffs.method()
    }

    pub fn coefficients(&self) -> &PeerCoefficients {
        &self.coeffs
    }
}

impl Integrator for Peer {
    fn info(&self) -> IntegratorInfo {
        IntegratorInfo {
            name: self.coeffs.method().name(),
            stages: self.coeffs.stages(),
            order: self.coeffs.order(),
        }
    }

    fn integrate<F>(
        &self,
        f: &F,
        t0: Float,
        t_end: Float,
        y: &mut [Float],
        config: &Config,
    ) -> Result<Statistics, Error>
    where
        F: ODE + Sync,
    {
        let n = y.len();
        let config = config.resolve(t0, t_end, n, f.blocked())?;
        let coeffs = &self.coeffs;
        let (atol, rtol) = (config.absolute_tolerance, config.relative_tolerance);

        let mut state = RunState::new(coeffs.stages(), n);
        let mut stats = Statistics::default();

        startup::startup(coeffs, f, t0, t_end, y, &config, &mut state, &mut stats)?;
        y.copy_from_slice(state.solution());

        let mut h = state.step_estimate;
        while state.t < t_end - atol {
            if state.t + state.step_estimate > t_end {
                state.step_estimate = t_end - state.t;
            }
            h = state.step_estimate;
            stats.step_count += 1;

            state.compute_coefficients(coeffs, h);
            state.compute_stages(coeffs);
            state.evaluate(f, coeffs, h, config.block_size, config.parallel);
            stats.evaluation_count += coeffs.stages();

            let rer = state.estimate_error(coeffs, h, atol, rtol);
            state.propose_step(coeffs, rer, config.max_step_size);

            if rer <= 1.0 {
                state.accept(h);
                y.copy_from_slice(state.solution());
                stats.status = Status::AcceptedStep;
                log::trace!(
                    "accepted step {:.3e} (ratio {:.3}) at t = {:.6e}",
                    h,
                    state.step_ratio,
                    state.t
                );

                if config.one_step_only {
                    break;
                }
            } else {
                state.reject(h);
                stats.rejected_count += 1;
                stats.status = Status::RejectedStep;
                log::trace!(
                    "rejected step {:.3e} at t = {:.6e}, error quotient {:.3e}",
                    h,
                    state.t,
                    rer
                );

                if state.step_estimate < config.min_step_size {
                    stats.finish(state.t, h, state.step_estimate, Status::Failed);
                    log::warn!(
                        "{}: step size {:.3e} too small at t = {}",
                        coeffs.method(),
                        state.step_estimate,
                        state.t
                    );
                    return Err(Error::StepSizeTooSmall(stats));
                }
            }

            if stats.step_count > config.max_step_count {
                stats.finish(state.t, h, state.step_estimate, Status::Failed);
                log::warn!(
                    "{}: more than {} steps needed, stopped at t = {}",
                    coeffs.method(),
                    config.max_step_count,
                    state.t
                );
                return Err(Error::MaxStepCountExceeded(stats));
            }
        }

        stats.finish(state.t, h, state.step_estimate, Status::Done);
        log::debug!(
            "{}: reached t = {} after {} steps ({} rejected), {} evaluations",
            coeffs.method(),
            state.t,
            stats.step_count,
            stats.rejected_count,
            stats.evaluation_count
        );
        Ok(stats)
    }
}
