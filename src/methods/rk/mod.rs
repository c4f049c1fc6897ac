//! Explicit embedded Runge-Kutta integrators (RK2(3), RKF4(5), DOPRI5)

mod tableau;

use std::{fmt, str::FromStr};

use crate::{
    Config, Error, Float, IntegratorInfo, ODE, ResolvedConfig, Statistics, Status,
    hinit::hinit, integrator::Integrator, matrix::Matrix,
};

use tableau::{DOPRI5, RK2, RKFB4, Tableau};

const SAFETY_FACTOR: Float = 0.9;
const MIN_SCALE: Float = 0.2;
const MAX_SCALE: Float = 2.0;

/// The embedded Runge-Kutta pairs.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RkMethod {
    /// Three stages, order 3 with an embedded order 2 estimator.
    RK2,
    /// Runge-Kutta-Fehlberg, six stages, order 4 with an order 5 estimator.
    RKFB4,
    /// Dormand-Prince, seven stages (first same as last), order 5.
    DoPri5,
}

impl RkMethod {
    pub const ALL: [RkMethod; 3] = [RkMethod::RK2, RkMethod::RKFB4, RkMethod::DoPri5];

    pub fn name(self) -> &'static str {
        self.tableau().name
    }

    fn tableau(self) -> &'static Tableau {
        match self {
            RkMethod::RK2 => &RK2,
            RkMethod::RKFB4 => &RKFB4,
            RkMethod::DoPri5 => &DOPRI5,
        }
    }
}

impl fmt::Display for RkMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RkMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RkMethod::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::UnknownMethod(s.to_string()))
    }
}

/// Adaptive single-step integrator based on an embedded Runge-Kutta pair.
///
/// The error of a step is the RMS norm of the difference of the two
/// solutions, scaled by `atol + rtol * |y|` of the solution at the start of
/// the step. The next step is `h * clamp(0.9 * err^(-1/p), 0.2, 2.0)`.
///
/// Peer integrators use [`RkMethod::DoPri5`] to compute their starting
/// values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmbeddedRk {
    method: RkMethod,
}

impl EmbeddedRk {
    pub fn new(method: RkMethod) -> Self {
        Self { method }
    }

    /// Look up a method by its name, e.g. `"DoPri5"`.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        name.parse().map(Self::new)
    }

    pub fn method(&self) -> RkMethod {
        self.method
    }

    /// Integrate with a configuration whose defaults are already applied.
    pub(crate) fn integrate_resolved<F>(
        &self,
        f: &F,
        t0: Float,
        t_end: Float,
        y: &mut [Float],
        config: &ResolvedConfig,
    ) -> Result<Statistics, Error>
    where
        F: ODE,
    {
        let tab = self.method.tableau();
        let (n, s) = (y.len(), tab.stages());
        let (atol, rtol) = (config.absolute_tolerance, config.relative_tolerance);
        let hmax = config.max_step_size;

        let mut stats = Statistics::default();
        let mut ks = Matrix::zeros(s, n);
        let mut yc = vec![0.0; n];
        let mut t = t0;

        f.ode(t, y, ks.row_mut(0));
        stats.evaluation_count += 1;

        let mut h = match config.initial_step_size {
            Some(h0) => h0,
            None => hinit(f, t, y, ks.row(0), tab.order, hmax, atol, rtol, &mut stats),
        }
        .min(hmax);
        let mut h_next = h;
        let mut last = false;

        while t < t_end {
            if t + 1.01 * h - t_end > 0.0 {
                h = t_end - t;
                last = true;
            }
            stats.step_count += 1;

            for stg in 1..s {
                yc.copy_from_slice(y);
                for (j, &a) in tab.a[stg].iter().enumerate() {
                    for (yi, kj) in yc.iter_mut().zip(ks.row(j)) {
                        *yi += h * a * kj;
                    }
                }
                f.ode(t + h * tab.c[stg], &yc, ks.row_mut(stg));
            }
            stats.evaluation_count += s - 1;

            let mut err = 0.0;
            for i in 0..n {
                let mut e = 0.0;
                for stg in 0..s {
                    e += tab.e[stg] * ks[(stg, i)];
                }
                let sk = atol + rtol * y[i].abs();
                err += (h * e / sk).powi(2);
            }
            err = (err / n as Float).sqrt();

            let scale = if err.is_nan() {
                MIN_SCALE
            } else {
                (SAFETY_FACTOR * (1e-8 + err).powf(-1.0 / tab.order as Float))
                    .clamp(MIN_SCALE, MAX_SCALE)
            };
            h_next = (h * scale).min(hmax);

            if err <= 1.0 {
                for i in 0..n {
                    let mut inc = 0.0;
                    for stg in 0..s {
                        inc += tab.b[stg] * ks[(stg, i)];
                    }
                    y[i] += h * inc;
                }
                t = if last { t_end } else { t + h };
                stats.status = Status::AcceptedStep;
                log::trace!("{}: accepted step {:.3e} at t = {:.6e}", tab.name, h, t);

                if last || config.one_step_only {
                    break;
                }
                if tab.fsal {
                    ks.copy_row(s - 1, 0);
                } else {
                    f.ode(t, y, ks.row_mut(0));
                    stats.evaluation_count += 1;
                }
            } else {
                stats.rejected_count += 1;
                stats.status = Status::RejectedStep;
                last = false;
                log::trace!(
                    "{}: rejected step {:.3e} at t = {:.6e}, err = {:.3e}",
                    tab.name,
                    h,
                    t,
                    err
                );

                if h_next < config.min_step_size {
                    stats.finish(t, h, h_next, Status::Failed);
                    log::warn!("{}: step size {:.3e} too small at t = {}", tab.name, h_next, t);
                    return Err(Error::StepSizeTooSmall(stats));
                }
            }

            if stats.step_count > config.max_step_count {
                stats.finish(t, h, h_next, Status::Failed);
                log::warn!("{}: more than {} steps needed", tab.name, config.max_step_count);
                return Err(Error::MaxStepCountExceeded(stats));
            }

            h = h_next;
        }

        stats.finish(t, h, h_next, Status::Done);
        log::debug!(
            "{}: reached t = {} after {} steps ({} rejected), {} evaluations",
            tab.name,
            t,
            stats.step_count,
            stats.rejected_count,
            stats.evaluation_count
        );
        Ok(stats)
    }
}

impl Integrator for EmbeddedRk {
    fn info(&self) -> IntegratorInfo {
        let tab = self.method.tableau();
        IntegratorInfo {
            name: tab.name,
            stages: tab.stages(),
            order: tab.order,
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
        let config = config.resolve(t0, t_end, y.len(), false)?;
        self.integrate_resolved(f, t0, t_end, y, &config)
    }
}
