//! # ol-pricingengines
//!
//! Pricing engines for vanilla options.
//!
//! ## Engines
//!
//! - [`LatticeEngine`]: CRR / Jarrow-Rudd binomial and trinomial trees,
//!   European or American exercise
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton closed form, the
//!   limit the lattices converge to
//!
//! The one-call entry point is [`price`], which runs a [`LatticeEngine`]
//! with the default [`EngineConfig`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod config;
pub mod lattice_engine;

pub use analytic_european_engine::{
    black_scholes_merton, AnalyticEuropeanEngine, BlackScholesValues,
};
pub use config::{EngineConfig, StepLimitPolicy, DEFAULT_MAX_STEPS};
pub use lattice_engine::{price, LatticeEngine};
