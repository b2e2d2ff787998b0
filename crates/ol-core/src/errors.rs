//! Error types for optlattice.
//!
//! Every failure a pricing call can report is a variant of the single
//! `thiserror`-derived [`Error`] enum. The `ensure!` and `ensure_shape!`
//! macros defined here cover the two precondition families: user input
//! and internal lattice contracts.

use thiserror::Error;

use crate::Real;

/// The top-level error type used throughout optlattice.
///
/// All errors are local to a single pricing call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A model input is out of its admissible range (non-positive spot,
    /// strike, maturity or volatility, negative dividend yield, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unrecognised lattice calibration method.
    #[error("unsupported calibration method: {0}")]
    UnsupportedMethod(String),

    /// Option kind / exercise style combination the lattice cannot price.
    #[error("unsupported option type: {0}")]
    UnsupportedOptionType(String),

    /// A calibrated probability fell outside `[0, 1]`.
    ///
    /// The discretisation is invalid for the requested step size; the
    /// caller should pick a different step count or method.
    #[error("numerical instability in {method} calibration (dt = {dt}): {detail}")]
    NumericalInstability {
        /// Calibration method that produced the bad probability.
        method: String,
        /// Time step of the discretisation.
        dt: Real,
        /// Which probability was out of range and its value.
        detail: String,
    },

    /// Internal contract failure between lattice stages.
    #[error("lattice shape violation: {0}")]
    ShapeViolation(String),

    /// Malformed engine configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout optlattice.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameter(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ol_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ol_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameter(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::ShapeViolation(...))` if `$cond` is false.
///
/// Used at the hand-off points between lattice stages, where a mismatch
/// is a programming error rather than bad input.
///
/// # Example
/// ```
/// use ol_core::{ensure_shape, errors::Error};
/// fn same_len(a: &[f64], b: &[f64]) -> ol_core::errors::Result<()> {
///     ensure_shape!(a.len() == b.len(), "{} != {}", a.len(), b.len());
///     Ok(())
/// }
/// assert!(same_len(&[1.0], &[2.0]).is_ok());
/// assert!(matches!(same_len(&[1.0], &[]), Err(Error::ShapeViolation(_))));
/// ```
#[macro_export]
macro_rules! ensure_shape {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::ShapeViolation(
                format!($($msg)*)
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instability_message_names_method_and_step() {
        let e = Error::NumericalInstability {
            method: "CRR".into(),
            dt: 0.5,
            detail: "p_up = 1.2".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("CRR"));
        assert!(msg.contains("dt = 0.5"));
        assert!(msg.contains("p_up = 1.2"));
    }

    #[test]
    fn ensure_macro_maps_to_invalid_parameter() {
        fn check(x: Real) -> Result<()> {
            ensure!(x > 0.0, "spot must be positive, got {x}");
            Ok(())
        }
        assert_eq!(
            check(-1.0),
            Err(Error::InvalidParameter("spot must be positive, got -1".into()))
        );
    }
}
