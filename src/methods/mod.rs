//! Integration methods

pub mod peer;
pub mod rk;
