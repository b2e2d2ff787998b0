//! # ol-methods
//!
//! Numerical methods: recombining binomial and trinomial lattices for
//! vanilla options.
//!
//! # Modules
//!
//! * [`lattice`]: probability calibration, tree construction, terminal
//!   payoff evaluation, and backward induction

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: calibration, binomial/trinomial trees, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    BackwardInductor, CalibratedFactors, LatticeShape, OptionValueLattice, PriceLattice,
    ProbabilityCalibrator,
};
