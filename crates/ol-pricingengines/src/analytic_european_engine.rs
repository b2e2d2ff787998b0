//! Closed-form Black-Scholes-Merton pricing of European vanillas.
//!
//! This is the continuous-time limit every lattice approaches as the step
//! count grows, so it serves as the reference in convergence checks.

use ol_core::{errors::Result, Error, Real};
use ol_instruments::{ExerciseType, ModelParameters, OptionType, PricingEngine, PricingResults};
use ol_math::distributions::{normal_cdf, normal_pdf};

/// Below this total standard deviation the payoff is treated as known.
const MIN_STD_DEV: Real = 1e-15;

/// Price and first-order sensitivities of a European option.
///
/// Vega and rho are per unit (1.0 = 100 %) change; theta is per year.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlackScholesValues {
    /// Present value.
    pub npv: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// ∂V/∂σ.
    pub vega: Real,
    /// ∂V/∂t.
    pub theta: Real,
    /// ∂V/∂r.
    pub rho: Real,
}

/// Black-Scholes-Merton value of a European option with continuous
/// dividend yield `q`:
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
///
/// At or past expiry the intrinsic value is returned with zero Greeks.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    r: Real,
    q: Real,
    sigma: Real,
    maturity: Real,
) -> BlackScholesValues {
    let phi = option_type.sign();
    if maturity <= 0.0 {
        return BlackScholesValues {
            npv: (phi * (spot - strike)).max(0.0),
            ..BlackScholesValues::default()
        };
    }

    let sqrt_t = maturity.sqrt();
    let std_dev = sigma * sqrt_t;
    let growth = (-q * maturity).exp();
    let discount = (-r * maturity).exp();

    // Degenerate volatility collapses both d's onto the moneyness sign
    let (d1, d2) = if std_dev > MIN_STD_DEV {
        let d1 = ((spot / strike).ln() + (r - q) * maturity) / std_dev + 0.5 * std_dev;
        (d1, d1 - std_dev)
    } else {
        let itm = spot * growth > strike * discount;
        let d = if itm { Real::INFINITY } else { Real::NEG_INFINITY };
        (d, d)
    };

    let n1 = normal_cdf(phi * d1);
    let n2 = normal_cdf(phi * d2);
    let density = if std_dev > MIN_STD_DEV { normal_pdf(d1) } else { 0.0 };
    let forward_leg = spot * growth;
    let strike_leg = strike * discount;

    BlackScholesValues {
        npv: phi * (forward_leg * n1 - strike_leg * n2),
        delta: phi * growth * n1,
        gamma: if std_dev > MIN_STD_DEV {
            growth * density / (spot * std_dev)
        } else {
            0.0
        },
        vega: forward_leg * density * sqrt_t,
        theta: -forward_leg * density * sigma / (2.0 * sqrt_t) - phi * r * strike_leg * n2
            + phi * q * forward_leg * n1,
        rho: phi * maturity * strike_leg * n2,
    }
}

/// [`PricingEngine`] wrapper around [`black_scholes_merton`].
///
/// Reads the market and contract fields of [`ModelParameters`]; the lattice
/// fields (`steps`, `method`) are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl PricingEngine<ModelParameters> for AnalyticEuropeanEngine {
    fn calculate(&self, args: &ModelParameters) -> Result<PricingResults> {
        args.validate()?;
        if args.exercise != ExerciseType::European {
            return Err(Error::UnsupportedOptionType(format!(
                "closed form covers European exercise only, got {}",
                args.exercise
            )));
        }

        let v = black_scholes_merton(
            args.option_type,
            args.spot,
            args.strike,
            args.rate,
            args.dividend_yield,
            args.volatility,
            args.maturity,
        );
        Ok(PricingResults::from_npv(v.npv)
            .with_result("delta", v.delta)
            .with_result("gamma", v.gamma)
            .with_result("vega", v.vega)
            .with_result("theta", v.theta)
            .with_result("rho", v.rho))
    }
}
