//! # ol-math
//!
//! Mathematical utilities: the standard normal distribution (via statrs)
//! and the `Matrix` newtype (over nalgebra) that backs every lattice grid.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Dense two-dimensional storage.
pub mod matrix;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use matrix::Matrix;
