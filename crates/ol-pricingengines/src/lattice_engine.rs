//! Lattice pricing engine for vanilla options.
//!
//! Runs the lattice pipeline of `ol-methods` once per call:
//! calibrate, grow the price tree, evaluate the payoff at maturity and roll
//! back to the root. Works for CRR and Jarrow-Rudd binomial trees and for
//! the trinomial tree, with European or American exercise.

use ol_core::{errors::Result, Error, Real};
use ol_instruments::{
    ExerciseType, LatticeMethod, ModelParameters, Payoff, PricingEngine, PricingResults,
};
use ol_methods::{BackwardInductor, OptionValueLattice, PriceLattice, ProbabilityCalibrator};
use tracing::{debug, warn};

use crate::config::{EngineConfig, StepLimitPolicy};

/// Lattice pricing engine.
///
/// Holds only its [`EngineConfig`]; every call allocates its own lattices,
/// so one engine can be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeEngine {
    config: EngineConfig,
}

impl LatticeEngine {
    /// Create an engine with the given resource policy.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's resource policy.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Present value of the option described by `params`.
    ///
    /// # Errors
    /// * [`Error::InvalidParameter`] for out-of-range inputs, or a step
    ///   count above the configured bound under [`StepLimitPolicy::Reject`]
    /// * [`Error::UnsupportedOptionType`] for Bermudan exercise
    /// * [`Error::NumericalInstability`] when a calibrated probability falls
    ///   outside `[0, 1]`
    pub fn price(&self, params: &ModelParameters) -> Result<Real> {
        self.calculate(params).map(|results| results.npv)
    }

    /// Price each row of an option chain independently.
    ///
    /// A failing row does not affect the others.
    pub fn price_all(&self, rows: &[ModelParameters]) -> Vec<Result<Real>> {
        rows.iter().map(|params| self.price(params)).collect()
    }

    fn check_request(&self, params: &ModelParameters) -> Result<()> {
        params.validate()?;
        if params.exercise == ExerciseType::Bermudan {
            return Err(Error::UnsupportedOptionType(format!(
                "{} {} options cannot be priced on a lattice",
                params.exercise, params.option_type
            )));
        }
        if params.steps > self.config.max_steps {
            match self.config.step_limit {
                StepLimitPolicy::Reject => {
                    return Err(Error::InvalidParameter(format!(
                        "{} steps exceeds the configured maximum of {}",
                        params.steps, self.config.max_steps
                    )))
                }
                StepLimitPolicy::Warn => warn!(
                    steps = params.steps,
                    max_steps = self.config.max_steps,
                    "step count above configured maximum, pricing anyway"
                ),
            }
        }
        Ok(())
    }
}

impl PricingEngine<ModelParameters> for LatticeEngine {
    fn calculate(&self, args: &ModelParameters) -> Result<PricingResults> {
        self.check_request(args)?;
        let payoff = args.payoff();

        // Zero steps: no tree, just the discounted payoff at spot
        if args.steps == 0 {
            let npv = (-args.rate * args.maturity).exp() * payoff.value(args.spot);
            debug!(
                method = args.method.name(),
                option_type = %args.option_type,
                npv,
                "degenerate zero-step lattice"
            );
            return Ok(PricingResults::from_npv(npv).with_result("steps", 0.0));
        }

        let factors = ProbabilityCalibrator::new(args.method).calibrate(args)?;
        debug!(
            method = factors.method.name(),
            dt = factors.dt,
            up = factors.up,
            down = factors.down,
            p_up = factors.p_up,
            p_mid = factors.p_mid,
            p_down = factors.p_down,
            "calibrated lattice"
        );

        let prices = PriceLattice::build(args.spot, &factors, args.steps);
        // Level 0 at maturity is the largest node of either shape
        let top = prices.price(0, args.steps);
        if !top.is_finite() {
            return Err(Error::NumericalInstability {
                method: factors.method.name().to_string(),
                dt: factors.dt,
                detail: format!(
                    "lattice node overflow: S0·u^{} = {top}; reduce steps, volatility or maturity",
                    args.steps
                ),
            });
        }
        let terminal = OptionValueLattice::terminal(&prices, &payoff);
        let inductor = BackwardInductor::new(&factors, args.rate, args.exercise)?;
        let npv = inductor.roll_back(&prices, terminal, &payoff)?.root_value();

        debug!(
            method = factors.method.name(),
            option_type = %args.option_type,
            exercise = %args.exercise,
            steps = args.steps,
            npv,
            "priced on lattice"
        );

        let mut results = PricingResults::from_npv(npv)
            .with_result("dt", factors.dt)
            .with_result("up", factors.up)
            .with_result("down", factors.down)
            .with_result("p_up", factors.p_up)
            .with_result("p_down", factors.p_down)
            .with_result("steps", args.steps as Real);
        if args.method == LatticeMethod::Trinomial {
            results = results.with_result("p_mid", factors.p_mid);
        }
        Ok(results)
    }
}

/// Price `params` with a default-configured [`LatticeEngine`].
///
/// ```
/// use ol_instruments::{LatticeMethod, ModelParameters};
///
/// let params = ModelParameters::new(100.0, 101.0, 1.0, 0.04, 0.2, 3)
///     .with_method(LatticeMethod::Trinomial);
/// let npv = ol_pricingengines::price(&params).unwrap();
/// assert!((npv - 8.864947577500798).abs() < 1e-10);
/// ```
pub fn price(params: &ModelParameters) -> Result<Real> {
    LatticeEngine::default().price(params)
}
