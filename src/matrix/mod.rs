//! Dense row-major matrices and the structured solves used by the peer methods.

mod base;
mod index;
mod vandermonde;

pub use base::Matrix;
