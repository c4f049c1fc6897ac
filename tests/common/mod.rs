#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use peer_ivp::prelude::*;

/// Install `env_logger` once; set `RUST_LOG=trace` to follow every step.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// y' = c, exact solution y(t) = y0 + c (t - t0).
pub struct Constant(pub f64);

impl ODE for Constant {
    fn ode(&self, _x: f64, _y: &[f64], dydx: &mut [f64]) {
        dydx.fill(self.0);
    }
}

/// y' = 2t, exact solution y(t) = t^2.
pub struct Ramp;

impl ODE for Ramp {
    fn ode(&self, x: f64, _y: &[f64], dydx: &mut [f64]) {
        dydx[0] = 2.0 * x;
    }
}

/// y' = 3t^2 - 1, exact solution y(t) = t^3 - t.
pub struct Cubic;

impl ODE for Cubic {
    fn ode(&self, x: f64, _y: &[f64], dydx: &mut [f64]) {
        dydx[0] = 3.0 * x * x - 1.0;
    }
}

/// y' = -200 (y - cos t): a mildly stiff problem that forces rejections.
pub struct Relaxation;

impl ODE for Relaxation {
    fn ode(&self, x: f64, y: &[f64], dydx: &mut [f64]) {
        dydx[0] = -200.0 * (y[0] - x.cos());
    }
}

/// Two decoupled oscillators, y'' = -y and z'' = -4z.
pub struct Oscillators;

impl ODE for Oscillators {
    fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
        dydx[0] = y[1];
        dydx[1] = -y[0];
        dydx[2] = y[3];
        dydx[3] = -4.0 * y[2];
    }
}

/// Wraps a right-hand side and counts its evaluations.
pub struct Counting<F> {
    inner: F,
    calls: AtomicUsize,
}

impl<F> Counting<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<F: ODE> ODE for Counting<F> {
    fn ode(&self, x: f64, y: &[f64], dydx: &mut [f64]) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.ode(x, y, dydx);
    }
}

pub fn peer_methods() -> impl Iterator<Item = Peer> {
    PeerMethod::ALL.into_iter().map(Peer::new)
}
