//! Starting values of a peer method from a single initial value.
//!
//! A peer step needs the solution and its derivative at all `S` nodes of the
//! previous step. They are computed with the Dormand-Prince integrator at a
//! tighter tolerance than the run itself.

use crate::{
    Error, Float, ODE, ResolvedConfig, Statistics, Status,
    hinit::hinit,
    methods::rk::{EmbeddedRk, RkMethod},
};

use super::{coefficients::PeerCoefficients, run::RunState};

/// Fill the old stage buffers of `state` from `y0` at `t0`.
///
/// The smallest node is placed at `t0`. A single DOPRI5 step from `t0`
/// determines where the largest node lands, and with it the size of the
/// starting step. Every other stage is integrated from `t0` to its own node.
///
/// The initial step is limited by the maximal step size and by `t_end - t0`,
/// so `state.t` never passes `t_end`.
///
/// On return `state.t` is the time of the last stage, `state.step_previous`
/// holds the starting step and `state.step_estimate` the starting step capped
/// at the maximal step size.
pub(super) fn startup<F>(
    coeffs: &PeerCoefficients,
    f: &F,
    t0: Float,
    t_end: Float,
    y0: &[Float],
    config: &ResolvedConfig,
    state: &mut RunState,
    stats: &mut Statistics,
) -> Result<(), Error>
where
    F: ODE,
{
    let nodes = coeffs.nodes();
    let (imin, imax) = (coeffs.index_min_node(), coeffs.index_max_node());
    let dopri = EmbeddedRk::new(RkMethod::DoPri5);

    state.y_old.row_mut(imin).copy_from_slice(y0);
    f.ode(t0, y0, state.f_old.row_mut(imin));
    stats.evaluation_count += 1;

    // the largest node is at least 1, so the stages stay within [t0, t0 + h0]
    let h_limit = config.max_step_size.min(t_end - t0);
    let h0 = match config.initial_step_size {
        Some(h0) => h0.min(h_limit),
        None => {
            let mut estimate = Statistics::default();
            let h = hinit(
                f,
                t0,
                y0,
                state.f_old.row(imin),
                coeffs.order(),
                h_limit,
                config.absolute_tolerance,
                config.relative_tolerance,
                &mut estimate,
            );
            stats.add_startup_evaluations(estimate.evaluation_count);
            h
        }
    };

    let mut sub_config = ResolvedConfig {
        initial_step_size: Some(h0),
        max_step_size: h0,
        absolute_tolerance: (0.1 * config.absolute_tolerance).max(1e-14),
        relative_tolerance: (0.1 * config.relative_tolerance).max(1e-14),
        one_step_only: true,
        block_size: y0.len(),
        parallel: false,
        ..config.clone()
    };

    // one step towards t0 + h0 places the largest node
    state.y_old.row_mut(imax).copy_from_slice(y0);
    let probe = dopri
        .integrate_resolved(f, t0, t0 + h0, state.y_old.row_mut(imax), &sub_config)
        .map_err(|err| startup_failed(stats, t0, err))?;
    stats.add_startup_evaluations(probe.evaluation_count);

    let tc = probe.current_time;
    f.ode(tc, state.y_old.row(imax), state.f_old.row_mut(imax));
    stats.add_startup_evaluations(1);

    let step = (tc - t0) / (nodes[imax] - nodes[imin]);
    let t_base = t0 - step * nodes[imin];

    sub_config.one_step_only = false;
    for stg in (0..coeffs.stages()).filter(|&i| i != imin && i != imax) {
        let t_stage = t_base + step * nodes[stg];
        sub_config.initial_step_size = Some(step * (nodes[stg] - nodes[imin]));
        sub_config.max_step_size = t_stage - t0;

        state.y_old.row_mut(stg).copy_from_slice(y0);
        let sub = dopri
            .integrate_resolved(f, t0, t_stage, state.y_old.row_mut(stg), &sub_config)
            .map_err(|err| startup_failed(stats, t0, err))?;
        stats.add_startup_evaluations(sub.evaluation_count);

        f.ode(t_stage, state.y_old.row(stg), state.f_old.row_mut(stg));
        stats.add_startup_evaluations(1);
    }

    state.t = t_base + step;
    state.step_previous = step;
    state.step_estimate = step.min(config.max_step_size);

    log::debug!(
        "{}: started with step {:.6e}, t = {:.6e}, {} evaluations",
        coeffs.method(),
        step,
        state.t,
        stats.startup_evaluation_count + 1
    );
    Ok(())
}

fn startup_failed(stats: &mut Statistics, t0: Float, err: Error) -> Error {
    if let Some(sub) = err.statistics() {
        stats.add_startup_evaluations(sub.evaluation_count);
    }
    stats.current_time = t0;
    stats.status = Status::Failed;
    log::warn!("startup failed: {err}");
    Error::Startup {
        stats: *stats,
        source: Box::new(err),
    }
}
