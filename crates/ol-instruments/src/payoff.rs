//! Option type and vanilla payoff.
//!
//! Payoffs describe the terminal (or exercise) value of an option as a
//! function of the underlying asset price.

use ol_core::{Error, Real};
use std::fmt;
use std::str::FromStr;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// A call option (right to buy).
    #[default]
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(Error::UnsupportedOptionType(format!(
                "unknown option kind '{other}' (expected call or put)"
            ))),
        }
    }
}

/// Value received on exercise as a function of the underlying price.
///
/// Lattices evaluate it at every leaf, and at every interior node when
/// early exercise is allowed.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Exercise value at underlying price `price`.
    fn value(&self, price: Real) -> Real;
}

/// Call or put payoff struck at `K`: `max(φ(S − K), 0)` with `φ = ±1`.
///
/// The same formula serves as the terminal payoff and as the intrinsic
/// value compared against continuation under American exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike `K`.
    pub strike: Real,
    phi: Real,
}

impl PlainVanillaPayoff {
    /// Payoff of a `option_type` struck at `strike`.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
            phi: option_type.sign(),
        }
    }
}

impl Payoff for PlainVanillaPayoff {
    #[inline]
    fn value(&self, price: Real) -> Real {
        (self.phi * (price - self.strike)).max(0.0)
    }
}

impl fmt::Display for PlainVanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.option_type, self.strike)
    }
}
