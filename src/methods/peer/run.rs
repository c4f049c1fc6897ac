//! Mutable state of one peer integration run and the per-step pipeline.

use rayon::prelude::*;

use crate::{Float, ODE, matrix::Matrix};

use super::coefficients::PeerCoefficients;

/// Lower bound of the step ratio after an accepted step.
const STEP_RATIO_FLOOR: Float = 0.2;
/// Factor applied to the ratio floor after every rejected step.
const STEP_RATIO_FLOOR_DECAY: Float = 0.2;
const SAFETY_FACTOR: Float = 0.95;

/// Stage values and step-size control data of one run.
///
/// Old and new stage buffers are exchanged with [`std::mem::swap`] when a
/// step is accepted, so no stage data is ever copied between them.
pub(crate) struct RunState {
    /// Stage values of the last accepted step, one stage per row.
    pub y_old: Matrix,
    pub y_new: Matrix,
    pub f_old: Matrix,
    pub f_new: Matrix,
    /// `hp * A(sigma)` for the current step.
    pa: Matrix,
    error_factors: Vec<Float>,
    /// Time of the last stage (node 1) of the accepted step.
    pub t: Float,
    /// Size of the last accepted step.
    pub step_previous: Float,
    pub step_estimate: Float,
    /// Ratio of the current step to the previous accepted one.
    pub step_ratio: Float,
    pub step_ratio_min: Float,
}

impl RunState {
    pub fn new(stages: usize, n: usize) -> Self {
        Self {
            y_old: Matrix::zeros(stages, n),
            y_new: Matrix::zeros(stages, n),
            f_old: Matrix::zeros(stages, n),
            f_new: Matrix::zeros(stages, n),
            pa: Matrix::square(stages),
            error_factors: vec![0.0; n],
            t: 0.0,
            step_previous: 0.0,
            step_estimate: 0.0,
            step_ratio: 1.0,
            step_ratio_min: STEP_RATIO_FLOOR,
        }
    }

    /// Solution at the end of the last accepted step.
    pub fn solution(&self) -> &[Float] {
        self.y_old.row(self.y_old.nrows() - 1)
    }

    /// Set the step ratio for a step of size `h` and compute `hp * A(sigma)`.
    pub fn compute_coefficients(&mut self, coeffs: &PeerCoefficients, h: Float) {
        let s = coeffs.stages();
        let hp = self.step_previous;
        let sigma = h / hp;
        self.step_ratio = sigma;

        let (a0, cv, pv) = (coeffs.a0(), coeffs.cv(), coeffs.pv());
        for stg in 0..s {
            for k in 0..s {
                self.pa[(stg, k)] = hp * a0[(stg, k)];
            }
            let mut scale = hp;
            for j in 0..s {
                scale *= sigma;
                let w = cv[(stg, j)] * scale;
                for k in 0..s {
                    self.pa[(stg, k)] += w * pv[(j, k)];
                }
            }
        }
    }

    /// `Y_new[i] = sum_k B[i][k] Y_old[k] + sum_k pa[i][k] F_old[k]`.
    pub fn compute_stages(&mut self, coeffs: &PeerCoefficients) {
        let s = coeffs.stages();
        let b = coeffs.b();
        for stg in 0..s {
            let row = self.y_new.row_mut(stg);
            row.fill(0.0);
            for k in 0..s {
                let wb = b[(stg, k)];
                for (y, yo) in row.iter_mut().zip(self.y_old.row(k)) {
                    *y += wb * yo;
                }
            }
            for k in 0..s {
                let wa = self.pa[(stg, k)];
                for (y, fo) in row.iter_mut().zip(self.f_old.row(k)) {
                    *y += wa * fo;
                }
            }
        }
    }

    /// `F_new[i] = f(t + h c_i, Y_new[i])` for every stage.
    ///
    /// With `block_size < n` every stage is evaluated block by block. With
    /// `parallel` the stages, and the blocks of each stage, are dispatched
    /// to the rayon thread pool. The result does not depend on either option.
    pub fn evaluate<F>(
        &mut self,
        f: &F,
        coeffs: &PeerCoefficients,
        h: Float,
        block_size: usize,
        parallel: bool,
    ) where
        F: ODE + Sync,
    {
        let n = self.y_new.ncols();
        let t = self.t;
        let nodes = coeffs.nodes();
        let y_new = &self.y_new;

        let stage = |(stg, dydx): (usize, &mut [Float])| {
            evaluate_stage(f, t + h * nodes[stg], y_new.row(stg), dydx, block_size, parallel);
        };

        if parallel {
            self.f_new
                .as_mut_slice()
                .par_chunks_mut(n)
                .enumerate()
                .for_each(stage);
        } else {
            self.f_new
                .as_mut_slice()
                .chunks_mut(n)
                .enumerate()
                .for_each(stage);
        }
    }

    /// Scaled error quotient `rer` of the current step; `rer <= 1` accepts.
    ///
    /// The error of component `i` is `sum_s e_s F_new[s][i]`, scaled by
    /// `atol + rtol |y_i|` with `y` the last accepted solution.
    pub fn estimate_error(
        &mut self,
        coeffs: &PeerCoefficients,
        h: Float,
        atol: Float,
        rtol: Float,
    ) -> Float {
        let n = self.error_factors.len();
        let last = self.y_old.nrows() - 1;

        self.error_factors.fill(0.0);
        for (e, f) in coeffs.error_weights().iter().zip(self.f_new.rows()) {
            for (acc, fi) in self.error_factors.iter_mut().zip(f) {
                *acc += e * fi;
            }
        }

        let mut sum = 0.0;
        for (err, y) in self.error_factors.iter().zip(self.y_old.row(last)) {
            let scaled = err / (atol + rtol * y.abs());
            sum += scaled * scaled;
        }

        h * (sum / n as Float).sqrt() + 1e-8
    }

    /// Propose the next step from the error quotient of the current one.
    ///
    /// With `q = p / 2` the error model predicts the ratio
    /// `sqrt((((sigma^2 + a)^q - a0) / rer + a0)^(1/q) - a)`. The ratio is
    /// clamped to `[step_ratio_min, step_ratio_max]`, damped by a safety
    /// factor and capped at `max_step`.
    pub fn propose_step(&mut self, coeffs: &PeerCoefficients, rer: Float, max_step: Float) {
        let q = coeffs.order() as Float / 2.0;
        let (a, a0) = (coeffs.error_model_a(), coeffs.error_model_a0());

        let sighs = (self.step_ratio * self.step_ratio + a).powf(q) - a0;
        let ratio = ((sighs / rer + a0).powf(1.0 / q) - a).sqrt();
        let ratio = if ratio.is_nan() {
            self.step_ratio_min
        } else {
            ratio.min(coeffs.step_ratio_max()).max(self.step_ratio_min)
        };

        self.step_estimate = (self.step_previous * ratio * SAFETY_FACTOR).min(max_step);
    }

    /// Make the new stages the old ones and advance the time by `h`.
    pub fn accept(&mut self, h: Float) {
        std::mem::swap(&mut self.y_old, &mut self.y_new);
        std::mem::swap(&mut self.f_old, &mut self.f_new);
        self.t += h;
        self.step_previous = h;
        self.step_ratio_min = STEP_RATIO_FLOOR;
    }

    /// Lower the ratio floor after the step of size `h` was rejected.
    ///
    /// The ratio floor is relative to the last accepted step, so a clipped
    /// final step may sit below it. The proposal is therefore also kept
    /// below the rejected step itself.
    pub fn reject(&mut self, h: Float) {
        self.step_ratio_min *= STEP_RATIO_FLOOR_DECAY;
        self.step_estimate = self.step_estimate.min(h * SAFETY_FACTOR);
    }
}

fn evaluate_stage<F>(
    f: &F,
    x: Float,
    y: &[Float],
    dydx: &mut [Float],
    block_size: usize,
    parallel: bool,
) where
    F: ODE + Sync,
{
    if block_size >= y.len() {
        f.ode(x, y, dydx);
    } else if parallel {
        dydx.par_chunks_mut(block_size)
            .enumerate()
            .for_each(|(k, block)| f.ode_block(k * block_size, x, y, block));
    } else {
        for (k, block) in dydx.chunks_mut(block_size).enumerate() {
            f.ode_block(k * block_size, x, y, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::RunState;
    use crate::{Float, ODE, PeerCoefficients, PeerMethod};

    /// y' = 2t, stored in every component.
    struct Ramp;

    impl ODE for Ramp {
        fn ode(&self, x: Float, _y: &[Float], dydx: &mut [Float]) {
            dydx.fill(2.0 * x);
        }
    }

    /// Load the exact stages of y = t^2 for a previous step `hp` ending at
    /// `t`.
    fn quadratic_state(coeffs: &PeerCoefficients, n: usize, t: Float, hp: Float) -> RunState {
        let mut state = RunState::new(coeffs.stages(), n);
        state.t = t;
        state.step_previous = hp;
        for (stg, c) in coeffs.nodes().iter().enumerate() {
            let ts = t - hp + hp * c;
            state.y_old.row_mut(stg).fill(ts * ts);
            state.f_old.row_mut(stg).fill(2.0 * ts);
        }
        state
    }

    #[test]
    fn stages_reproduce_quadratics_for_any_step_ratio() {
        for method in [PeerMethod::EPP4, PeerMethod::EPP6j1, PeerMethod::EPP8_d] {
            let coeffs = PeerCoefficients::new(method);
            for h in [0.05, 0.1, 0.13] {
                let mut state = quadratic_state(&coeffs, 3, 1.0, 0.1);
                state.compute_coefficients(&coeffs, h);
                assert_relative_eq!(state.step_ratio, h / 0.1);
                state.compute_stages(&coeffs);

                for (stg, c) in coeffs.nodes().iter().enumerate() {
                    let ts = 1.0 + h * c;
                    for &y in state.y_new.row(stg) {
                        assert_relative_eq!(y, ts * ts, epsilon = 1e-10);
                    }
                }
            }
        }
    }

    #[test]
    fn smooth_steps_have_negligible_error() {
        let coeffs = PeerCoefficients::new(PeerMethod::EPP4);
        let mut state = quadratic_state(&coeffs, 2, 0.5, 0.1);
        state.compute_coefficients(&coeffs, 0.1);
        state.compute_stages(&coeffs);
        state.evaluate(&Ramp, &coeffs, 0.1, 2, false);

        let rer = state.estimate_error(&coeffs, 0.1, 1e-6, 1e-6);
        assert!(rer < 1e-6, "rer = {rer}");

        // tiny error: growth is limited by the maximal step ratio
        state.propose_step(&coeffs, rer, 10.0);
        assert_relative_eq!(state.step_estimate, 0.1 * coeffs.step_ratio_max() * 0.95);

        // and capped by the maximal step
        state.propose_step(&coeffs, rer, 0.12);
        assert_eq!(state.step_estimate, 0.12);
    }

    #[test]
    fn ratio_floor_decays_on_rejection_and_resets_on_acceptance() {
        let coeffs = PeerCoefficients::new(PeerMethod::EPP4);
        let mut state = RunState::new(coeffs.stages(), 1);
        state.step_previous = 1.0;
        state.step_ratio = 1.0;

        let mut previous = Float::INFINITY;
        for _ in 0..4 {
            // a huge error quotient proposes the floor itself
            state.propose_step(&coeffs, 1e30, 10.0);
            assert_relative_eq!(state.step_estimate, state.step_ratio_min * 0.95);
            assert!(state.step_estimate < previous);
            previous = state.step_estimate;
            state.reject(1.0);
        }
        assert_relative_eq!(state.step_ratio_min, 0.2_f64.powi(5), max_relative = 1e-12);

        state.accept(0.5);
        assert_eq!(state.step_ratio_min, 0.2);
        assert_eq!(state.step_previous, 0.5);
        assert_eq!(state.t, 0.5);
    }

    #[test]
    fn rejected_short_step_shrinks() {
        let coeffs = PeerCoefficients::new(PeerMethod::EPP4);
        let mut state = RunState::new(coeffs.stages(), 1);
        state.step_previous = 1.0;
        // a final step clipped far below the ratio floor
        let h = 0.05;
        state.step_ratio = h;
        state.propose_step(&coeffs, 1e30, 10.0);
        assert!(state.step_estimate > h);

        state.reject(h);
        assert_relative_eq!(state.step_estimate, h * 0.95);
    }

    #[test]
    fn non_finite_error_proposes_the_floor() {
        let coeffs = PeerCoefficients::new(PeerMethod::EPP8_d);
        let mut state = RunState::new(coeffs.stages(), 1);
        state.step_previous = 2.0;
        state.propose_step(&coeffs, Float::NAN, 10.0);
        assert_relative_eq!(state.step_estimate, 2.0 * 0.2 * 0.95);
    }

    #[test]
    fn accept_swaps_buffers() {
        let coeffs = PeerCoefficients::new(PeerMethod::EPP2);
        let mut state = RunState::new(coeffs.stages(), 2);
        state.y_new.row_mut(1).copy_from_slice(&[3.0, 4.0]);
        state.f_new.row_mut(0).fill(7.0);
        state.accept(0.25);
        assert_eq!(state.solution(), &[3.0, 4.0]);
        assert_eq!(state.f_old.row(0), &[7.0, 7.0]);
        assert_eq!(state.y_new.row(1), &[0.0, 0.0]);
    }
}
