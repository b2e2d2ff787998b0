//! # optlattice
//!
//! Binomial and trinomial lattice pricing of vanilla options.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ol-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use optlattice::{price, ExerciseType, LatticeMethod, ModelParameters, OptionType};
//!
//! let params = ModelParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, 200)
//!     .with_option_type(OptionType::Put)
//!     .with_exercise(ExerciseType::American)
//!     .with_method(LatticeMethod::CoxRossRubinstein);
//! let npv = price(&params).unwrap();
//! assert!((npv - 6.086382749916067).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ol_core as core;

/// The normal distribution and the lattice grid type.
pub use ol_math as math;

/// Option descriptions, payoffs and the pricing engine trait.
pub use ol_instruments as instruments;

/// Lattice calibration, construction and backward induction.
pub use ol_methods as methods;

/// Lattice and analytic pricing engines.
pub use ol_pricingengines as pricingengines;

pub use ol_core::{Error, Result};
pub use ol_instruments::{
    ExerciseType, LatticeMethod, ModelParameters, OptionType, PricingEngine, PricingResults,
};
pub use ol_pricingengines::{
    price, AnalyticEuropeanEngine, EngineConfig, LatticeEngine, StepLimitPolicy,
};
