//! Convenient prelude: import the most commonly used traits and types.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use peer_ivp::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits: `ODE`, `Integrator`.
//! - Integrators: `Peer`, `PeerMethod`, `EmbeddedRk`, `RkMethod`.
//! - Run types: `Config`, `Statistics`, `Status`, `Error`.
//!

pub use crate::{
    Config, EmbeddedRk, Error, Float, Integrator, IntegratorInfo, ODE, Peer, PeerMethod, RkMethod,
    Statistics, Status,
};
