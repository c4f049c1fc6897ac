//! Adaptive integrators for initial value problems of ordinary differential equations.
//!
//! Two families share one configuration, statistics and error model:
//!
//! - explicit peer methods ([`Peer`]) with variable step-size ratios, started
//!   from a single initial value by an embedded Runge-Kutta sub-integrator,
//! - classical embedded Runge-Kutta methods ([`EmbeddedRk`]).
//!
//! ```ignore
//! use peer_ivp::prelude::*;
//!
//! struct Ramp;
//! impl ODE for Ramp {
//!     fn ode(&self, x: f64, _y: &[f64], dydx: &mut [f64]) {
//!         dydx[0] = 2.0 * x;
//!     }
//! }
//!
//! let peer = Peer::new(PeerMethod::EPP8_d);
//! let mut y = [100.0];
//! let config = Config::builder().absolute_tolerance(1e-4).build();
//! let stats = peer.integrate(&Ramp, -10.0, 10.0, &mut y, &config)?;
//! assert!((y[0] - 100.0).abs() < 1e-4);
//! ```

mod config;
mod error;
mod hinit;
mod integrator;
mod ode;
mod stats;
mod status;

pub mod matrix;
pub mod methods;
pub mod prelude;
pub mod problems;

pub use config::{Config, ResolvedConfig};
pub use error::Error;
pub use hinit::hinit;
pub use integrator::{Integrator, IntegratorInfo};
pub use methods::peer::{Peer, PeerCoefficients, PeerMethod};
pub use methods::rk::{EmbeddedRk, RkMethod};
pub use ode::ODE;
pub use stats::Statistics;
pub use status::Status;

/// Floating point type used throughout the crate.
pub type Float = f64;
