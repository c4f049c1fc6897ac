//! Two-dimensional Brusselator reaction-diffusion system.

use crate::{Float, ODE};

use super::Problem;

/// The Brusselator on an `n x n` grid over the unit square:
///
/// ```text
/// u' = B + u^2 v - (A + 1) u + alpha (n - 1)^2 lap(u)
/// v' = A u - u^2 v + alpha (n - 1)^2 lap(v)
/// ```
///
/// with `A = 3.4`, `B = 1`, `alpha = 0.002` and reflecting boundaries. The
/// state interleaves the two species cell by cell, `[u_0, v_0, u_1, v_1, ...]`,
/// cells in row-major order.
///
/// Every component only depends on its cell and the four neighbours, so
/// [`ODE::ode_block`] evaluates arbitrary index ranges directly.
#[derive(Clone, Debug)]
pub struct Brusselator {
    n: usize,
    a: Float,
    b: Float,
    /// `A + 1`
    a1: Float,
    /// `alpha * (n - 1)^2`
    diffusion: Float,
}

impl Brusselator {
    /// Brusselator on an `n x n` grid.
    ///
    /// # Panics
    /// If `n < 2`.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "the Brusselator grid needs at least 2x2 cells");
        let (a, b, alpha) = (3.4, 1.0, 0.002);
        let n1 = (n - 1) as Float;
        Self {
            n,
            a,
            b,
            a1: a + 1.0,
            diffusion: alpha * n1 * n1,
        }
    }

    /// Side length of the grid.
    pub fn grid_size(&self) -> usize {
        self.n
    }

    /// System dimension, two species per cell.
    pub fn dimension(&self) -> usize {
        2 * self.n * self.n
    }

    fn component(&self, index: usize, y: &[Float]) -> Float {
        let n = self.n;
        let cell = index / 2;
        let (row, col) = (cell / n, cell % n);

        // reflecting boundaries: a missing neighbour mirrors the opposite one
        let top = if row > 0 { cell - n } else { cell + n };
        let bottom = if row < n - 1 { cell + n } else { cell - n };
        let left = if col > 0 { cell - 1 } else { cell + 1 };
        let right = if col < n - 1 { cell + 1 } else { cell - 1 };

        let species = index % 2;
        let w = |c: usize| y[2 * c + species];
        let laplacian = w(top) + w(bottom) + w(left) + w(right) - 4.0 * w(cell);

        let (u, v) = (y[2 * cell], y[2 * cell + 1]);
        let uuv = u * u * v;
        if species == 0 {
            self.b + uuv - self.a1 * u + self.diffusion * laplacian
        } else {
            self.a * u - uuv + self.diffusion * laplacian
        }
    }
}

impl ODE for Brusselator {
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        for (i, d) in dydx.iter_mut().enumerate() {
            *d = self.component(i, y);
        }
    }

    fn blocked(&self) -> bool {
        true
    }

    fn ode_block(&self, start: usize, _x: Float, y: &[Float], dydx: &mut [Float]) {
        for (i, d) in dydx.iter_mut().enumerate() {
            *d = self.component(start + i, y);
        }
    }
}

impl Problem for Brusselator {
    fn description(&self) -> String {
        format!("2D Brusselator on a {0}x{0} grid", self.n)
    }

    fn initialize(&self) -> Vec<Float> {
        let n = self.n;
        let n1 = (n - 1) as Float;
        let mut y = vec![0.0; self.dimension()];
        for (cell, uv) in y.chunks_exact_mut(2).enumerate() {
            let x = (cell % n) as Float / n1;
            let yy = (cell / n) as Float / n1;
            uv[0] = 2.0 + 0.25 * yy;
            uv[1] = 1.0 + 0.8 * x;
        }
        y
    }
}
