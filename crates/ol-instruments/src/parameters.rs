//! Model inputs for a single lattice pricing call.

use ol_core::{ensure, Error, Rate, Real, Result, Time, Volatility};
use std::fmt;
use std::str::FromStr;

use crate::{ExerciseType, OptionType, PlainVanillaPayoff};

/// How the lattice move factors and branch probabilities are calibrated.
///
/// | Variant | Branches | Reference |
/// |---|---|---|
/// | [`CoxRossRubinstein`](Self::CoxRossRubinstein) | 2, `u·d = 1` | Cox, Ross & Rubinstein (1979) |
/// | [`JarrowRudd`](Self::JarrowRudd) | 2, `p = ½` | Jarrow & Rudd (1983) |
/// | [`Trinomial`](Self::Trinomial) | 3, `u = e^{σ√(3Δt)}` | Boyle (1986) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LatticeMethod {
    /// Cox-Ross-Rubinstein binomial tree.
    #[default]
    CoxRossRubinstein,
    /// Jarrow-Rudd equal-probability binomial tree.
    JarrowRudd,
    /// Recombining trinomial tree.
    Trinomial,
}

impl LatticeMethod {
    /// Short display name, used in diagnostics and error reports.
    pub fn name(self) -> &'static str {
        match self {
            LatticeMethod::CoxRossRubinstein => "CRR",
            LatticeMethod::JarrowRudd => "Jarrow-Rudd",
            LatticeMethod::Trinomial => "trinomial",
        }
    }

    /// `true` for the two-branch methods.
    pub fn is_binomial(self) -> bool {
        !matches!(self, LatticeMethod::Trinomial)
    }
}

impl fmt::Display for LatticeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LatticeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crr" | "cox-ross-rubinstein" => Ok(LatticeMethod::CoxRossRubinstein),
            "jr" | "jarrow-rudd" => Ok(LatticeMethod::JarrowRudd),
            "trinomial" | "tri" => Ok(LatticeMethod::Trinomial),
            other => Err(Error::UnsupportedMethod(format!(
                "'{other}' (expected crr, jr or trinomial)"
            ))),
        }
    }
}

/// Immutable input bundle for one pricing call.
///
/// Defaults follow the usual conventions for a quick quote: call, European
/// exercise, CRR calibration, no dividend yield.
///
/// ```
/// use ol_instruments::{ExerciseType, LatticeMethod, ModelParameters, OptionType};
///
/// let params = ModelParameters::new(100.0, 101.0, 1.0, 0.04, 0.2, 3)
///     .with_option_type(OptionType::Put)
///     .with_exercise(ExerciseType::American)
///     .with_method(LatticeMethod::Trinomial);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParameters {
    /// Spot price of the underlying, `S0 > 0`.
    pub spot: Real,
    /// Strike price, `K > 0`.
    pub strike: Real,
    /// Time to maturity in years, `T > 0`.
    pub maturity: Time,
    /// Continuously compounded risk-free rate.
    pub rate: Rate,
    /// Annualised volatility, `σ > 0`.
    pub volatility: Volatility,
    /// Continuous dividend yield, `q ≥ 0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: Rate,
    /// Number of time steps; `0` prices the undiscretised payoff at `S0`.
    pub steps: usize,
    /// Call or put.
    #[cfg_attr(feature = "serde", serde(default))]
    pub option_type: OptionType,
    /// Exercise style.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exercise: ExerciseType,
    /// Lattice calibration method.
    #[cfg_attr(feature = "serde", serde(default))]
    pub method: LatticeMethod,
}

impl ModelParameters {
    /// Create parameters for a European CRR call with no dividend yield.
    pub fn new(
        spot: Real,
        strike: Real,
        maturity: Time,
        rate: Rate,
        volatility: Volatility,
        steps: usize,
    ) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            dividend_yield: 0.0,
            steps,
            option_type: OptionType::Call,
            exercise: ExerciseType::European,
            method: LatticeMethod::CoxRossRubinstein,
        }
    }

    /// Set the continuous dividend yield.
    pub fn with_dividend_yield(mut self, q: Rate) -> Self {
        self.dividend_yield = q;
        self
    }

    /// Set the option type.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Set the exercise style.
    pub fn with_exercise(mut self, exercise: ExerciseType) -> Self {
        self.exercise = exercise;
        self
    }

    /// Set the calibration method.
    pub fn with_method(mut self, method: LatticeMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the number of time steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Time increment per step, `T / N`. `None` when `N = 0`.
    pub fn dt(&self) -> Option<Time> {
        (self.steps > 0).then(|| self.maturity / self.steps as Real)
    }

    /// The vanilla payoff described by these parameters.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.option_type, self.strike)
    }

    /// Check that every input lies in its admissible range.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] naming the first offending input.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.spot.is_finite() && self.spot > 0.0,
            "spot must be positive, got {}",
            self.spot
        );
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive, got {}",
            self.strike
        );
        ensure!(
            self.maturity.is_finite() && self.maturity > 0.0,
            "maturity must be positive, got {}",
            self.maturity
        );
        ensure!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        ensure!(
            self.volatility.is_finite() && self.volatility > 0.0,
            "volatility must be positive, got {}",
            self.volatility
        );
        ensure!(
            self.dividend_yield.is_finite() && self.dividend_yield >= 0.0,
            "dividend yield must be non-negative, got {}",
            self.dividend_yield
        );
        Ok(())
    }
}
