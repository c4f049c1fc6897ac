//! Compute an initial step size guess

use crate::{Float, ode::ODE, stats::Statistics};

/// Compute an initial step size guess for an ODE solver.
///
/// Classical two-stage heuristic (Hairer, Nørsett & Wanner): the ratio of
/// the scaled norms of `y` and `f0 = f(x, y)` gives a trial step, an explicit
/// Euler step of that size estimates the second derivative, and the final
/// guess is refined for a method of order `iord`. The result never exceeds
/// `hmax`.
///
/// Performs exactly one evaluation of `f`, which is recorded in `stats`.
pub fn hinit<F>(
    f: &F,
    x: Float,
    y: &[Float],
    f0: &[Float],
    iord: usize,
    hmax: Float,
    atol: Float,
    rtol: Float,
    stats: &mut Statistics,
) -> Float
where
    F: ODE,
{
    let n = y.len();
    let mut dnf: Float = 0.0;
    let mut dny: Float = 0.0;

    for i in 0..n {
        let sk = atol + rtol * y[i].abs();
        dnf += (f0[i] / sk) * (f0[i] / sk);
        dny += (y[i] / sk) * (y[i] / sk);
    }

    let mut h = if dnf.min(dny) < 1e-10 {
        1.0e-6
    } else {
        (dny / dnf).sqrt() * 0.01
    };
    h = h.min(hmax);

    // Explicit Euler step: y1 = y + h * f0
    let y1: Vec<Float> = y.iter().zip(f0).map(|(yi, fi)| yi + h * fi).collect();
    let mut f1 = vec![0.0; n];
    f.ode(x + h, &y1, &mut f1);
    stats.evaluation_count += 1;

    // Estimate second derivative
    let mut der2: Float = 0.0;
    for i in 0..n {
        let sk = atol + rtol * y[i].abs();
        let df = (f1[i] - f0[i]) / sk;
        der2 += df * df;
    }
    der2 = der2.sqrt() / h;

    let der12 = der2.max(dnf.sqrt());
    let h1 = if der12 <= 1.0e-15 {
        (1.0e-6 as Float).max(h * 1.0e-3)
    } else {
        (0.01 / der12).powf(1.0 / iord as Float)
    };

    (100.0 * h).min(h1).min(hmax)
}
