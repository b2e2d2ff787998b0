//! Risk-neutral calibration of lattice move factors and branch probabilities.
//!
//! | Method | Up `u` | Down `d` | Probabilities |
//! |---|---|---|---|
//! | CRR | `e^{σ√Δt}` | `1/u` | `p = (e^{(r−q)Δt} − d)/(u − d)` |
//! | Jarrow-Rudd | `e^{(r−q−σ²/2)Δt + σ√Δt}` | `e^{(r−q−σ²/2)Δt − σ√Δt}` | `p = ½` |
//! | Trinomial | `e^{σ√(3Δt)}` | `1/u` | `p_u,d = 1/6 ± √(Δt/12σ²)(r−q−σ²/2)`, `p_m = 2/3` |
//!
//! A probability outside `[0, 1]` means the step is too coarse for the drift
//! and is reported as [`Error::NumericalInstability`]; it is never clamped.

use ol_core::{ensure, Error, Probability, Real, Result, Time};
use ol_instruments::{LatticeMethod, ModelParameters};

/// Per-step move factors and branch probabilities of a calibrated lattice.
///
/// For the binomial methods `p_mid` is zero and `p_up + p_down = 1`; for the
/// trinomial method the middle move keeps the price unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibratedFactors {
    /// Method that produced these factors.
    pub method: LatticeMethod,
    /// Time increment per step, `T / N`.
    pub dt: Time,
    /// Multiplicative up move.
    pub up: Real,
    /// Multiplicative down move.
    pub down: Real,
    /// Probability of the up branch.
    pub p_up: Probability,
    /// Probability of the middle branch (trinomial only).
    pub p_mid: Probability,
    /// Probability of the down branch.
    pub p_down: Probability,
}

impl CalibratedFactors {
    fn check_probabilities(self) -> Result<Self> {
        let named = [("p_up", self.p_up), ("p_mid", self.p_mid), ("p_down", self.p_down)];
        for (name, p) in named {
            if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
                return Err(Error::NumericalInstability {
                    method: self.method.name().to_string(),
                    dt: self.dt,
                    detail: format!("{name} = {p} is outside [0, 1]; use more steps"),
                });
            }
        }
        Ok(self)
    }
}

/// Derives [`CalibratedFactors`] from model parameters for one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbabilityCalibrator {
    method: LatticeMethod,
}

impl ProbabilityCalibrator {
    /// Create a calibrator for `method`.
    pub fn new(method: LatticeMethod) -> Self {
        Self { method }
    }

    /// Calibrate move factors and probabilities for `params.steps` steps.
    ///
    /// # Errors
    /// * [`Error::InvalidParameter`] if `params.steps == 0` (there is no step
    ///   to calibrate) or `σ ≤ 0`.
    /// * [`Error::NumericalInstability`] if a probability leaves `[0, 1]`.
    pub fn calibrate(&self, params: &ModelParameters) -> Result<CalibratedFactors> {
        let dt = params.dt().ok_or_else(|| {
            Error::InvalidParameter("calibration needs at least one time step".into())
        })?;
        ensure!(
            params.volatility > 0.0,
            "volatility must be positive, got {}",
            params.volatility
        );

        let sigma = params.volatility;
        let carry = params.rate - params.dividend_yield;

        let factors = match self.method {
            LatticeMethod::CoxRossRubinstein => {
                let up = (sigma * dt.sqrt()).exp();
                let down = 1.0 / up;
                let p = ((carry * dt).exp() - down) / (up - down);
                CalibratedFactors {
                    method: self.method,
                    dt,
                    up,
                    down,
                    p_up: p,
                    p_mid: 0.0,
                    p_down: 1.0 - p,
                }
            }
            LatticeMethod::JarrowRudd => {
                let drift = (carry - 0.5 * sigma * sigma) * dt;
                let jump = sigma * dt.sqrt();
                CalibratedFactors {
                    method: self.method,
                    dt,
                    up: (drift + jump).exp(),
                    down: (drift - jump).exp(),
                    p_up: 0.5,
                    p_mid: 0.0,
                    p_down: 0.5,
                }
            }
            LatticeMethod::Trinomial => {
                let up = (sigma * (3.0 * dt).sqrt()).exp();
                let tilt = (dt / (12.0 * sigma * sigma)).sqrt() * (carry - 0.5 * sigma * sigma);
                CalibratedFactors {
                    method: self.method,
                    dt,
                    up,
                    down: 1.0 / up,
                    p_up: tilt + 1.0 / 6.0,
                    p_mid: 2.0 / 3.0,
                    p_down: -tilt + 1.0 / 6.0,
                }
            }
        };

        factors.check_probabilities()
    }
}
