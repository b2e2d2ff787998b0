//! # ol-instruments
//!
//! Vanilla option terms: option type, exercise style, payoff, and the
//! validated [`ModelParameters`] bundle a pricing engine consumes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod instrument;
pub mod parameters;
pub mod payoff;

pub use exercise::ExerciseType;
pub use instrument::{PricingEngine, PricingResults};
pub use parameters::{LatticeMethod, ModelParameters};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff};
