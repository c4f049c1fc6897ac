//! Benchmark problems: a reaction-diffusion grid and a gravitational N-body
//! system.

mod bruss2d;
mod mbody;

pub use bruss2d::Brusselator;
pub use mbody::MBody;

use crate::{Float, ODE};

/// An initial value problem with a fixed initial state.
pub trait Problem: ODE {
    /// Human readable description, e.g. for benchmark reports.
    fn description(&self) -> String;

    /// State at the initial time.
    fn initialize(&self) -> Vec<Float>;
}
