//! User-supplied ODE system.

use crate::Float;

/// User-supplied ODE system.
///
/// Implement this trait for your problem to provide the right-hand side
/// function y' = f(x, y). The integrator repeatedly calls `ode` with the
/// current abscissa `x` and state `y` and expects you to fill `dydx` with the
/// derivative values. `dydx` never aliases `y`.
///
/// Systems that can evaluate contiguous index ranges independently may also
/// override [`ODE::blocked`] and [`ODE::ode_block`]. Peer integrators then
/// split every stage evaluation into blocks of `Config::block_size`
/// components, which can be dispatched in parallel.
///
/// # Example
///
/// ```ignore
/// struct VanDerPol { eps: f64 }
/// impl ODE for VanDerPol {
///     fn ode(&self, x: f64, y: &[f64], dydx: &mut [f64]) {
///         dydx[0] = y[1];
///         dydx[1] = ((1.0 - y[0]*y[0])*y[1] - y[0]) / self.eps;
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]);

    /// Whether [`ODE::ode_block`] is a genuine blocked evaluation.
    /// If `false`, integrators force the block size to the system dimension.
    fn blocked(&self) -> bool {
        false
    }

    /// Evaluate the components `start..start + dydx.len()` of the right-hand
    /// side. `y` is always the full state vector.
    ///
    /// The result must be identical to [`ODE::ode`] restricted to that range.
    /// The provided implementation evaluates the whole system and copies the
    /// requested range.
    fn ode_block(&self, start: usize, x: Float, y: &[Float], dydx: &mut [Float]) {
        let mut full = vec![0.0; y.len()];
        self.ode(x, y, &mut full);
        dydx.copy_from_slice(&full[start..start + dydx.len()]);
    }
}
