//! Backward induction over a filled lattice.
//!
//! Steps run from `N − 1` down to `0`. At each live node the continuation
//! value is the one-step discounted expectation of the successor values:
//!
//! * binomial: `e^{−rΔt} (p · V[j, i+1] + (1 − p) · V[j+1, i+1])`
//! * trinomial: `e^{−rΔt} (p_u · V[j−1, i+1] + p_m · V[j, i+1] + p_d · V[j+1, i+1])`
//!
//! American exercise then takes `max(continuation, intrinsic)` at every
//! node. The dividend yield lives in the calibrated probabilities and is
//! not applied again here.

use ol_core::{ensure_shape, DiscountFactor, Error, Probability, Rate, Result};
use ol_instruments::{ExerciseType, Payoff};

use super::{CalibratedFactors, LatticeShape, OptionValueLattice, PriceLattice};

/// Rolls option values back from maturity to the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackwardInductor {
    shape: LatticeShape,
    discount: DiscountFactor,
    p_up: Probability,
    p_mid: Probability,
    p_down: Probability,
    early_exercise: bool,
}

impl BackwardInductor {
    /// Create an inductor for the calibrated lattice, discounting at the
    /// continuously compounded `rate`.
    ///
    /// # Errors
    /// [`Error::UnsupportedOptionType`] for exercise styles other than
    /// European or American.
    pub fn new(factors: &CalibratedFactors, rate: Rate, exercise: ExerciseType) -> Result<Self> {
        if exercise == ExerciseType::Bermudan {
            return Err(Error::UnsupportedOptionType(
                "lattice induction supports European and American exercise only".into(),
            ));
        }
        Ok(Self {
            shape: LatticeShape::of(factors),
            discount: (-rate * factors.dt).exp(),
            p_up: factors.p_up,
            p_mid: factors.p_mid,
            p_down: factors.p_down,
            early_exercise: exercise.allows_early_exercise(),
        })
    }

    /// One-step discount factor `e^{−rΔt}`.
    pub fn discount(&self) -> DiscountFactor {
        self.discount
    }

    /// Fill every column of `values` before maturity and return it.
    ///
    /// `values` must carry the terminal payoff of `prices`; `payoff` is
    /// re-evaluated at interior nodes for the early-exercise comparison.
    ///
    /// # Errors
    /// [`Error::ShapeViolation`] if the two lattices, or the lattices and
    /// the calibrated factors, disagree on shape.
    pub fn roll_back(
        &self,
        prices: &PriceLattice,
        mut values: OptionValueLattice,
        payoff: &dyn Payoff,
    ) -> Result<OptionValueLattice> {
        ensure_shape!(
            prices.shape() == self.shape && values.shape() == self.shape,
            "inductor calibrated for {:?} but lattices are {:?} / {:?}",
            self.shape,
            prices.shape(),
            values.shape()
        );
        ensure_shape!(
            prices.steps() == values.steps() && prices.dimensions() == values.dimensions(),
            "price lattice {:?} ({} steps) does not match value lattice {:?} ({} steps)",
            prices.dimensions(),
            prices.steps(),
            values.dimensions(),
            values.steps()
        );
        let expected_rows = self.shape.rows(prices.steps());
        ensure_shape!(
            prices.dimensions() == (expected_rows, prices.steps() + 1),
            "{:?} lattice with {} steps must be {}x{}, got {:?}",
            self.shape,
            prices.steps(),
            expected_rows,
            prices.steps() + 1,
            prices.dimensions()
        );

        let n = prices.steps();
        let v = &mut values.values;
        for i in (0..n).rev() {
            for j in prices.levels(i) {
                let expectation = match self.shape {
                    LatticeShape::Binomial => {
                        self.p_up * v[(j, i + 1)] + self.p_down * v[(j + 1, i + 1)]
                    }
                    LatticeShape::Trinomial => {
                        self.p_up * v[(j - 1, i + 1)]
                            + self.p_mid * v[(j, i + 1)]
                            + self.p_down * v[(j + 1, i + 1)]
                    }
                };
                // Discount first, then compare with exercising now
                let continuation = self.discount * expectation;
                v[(j, i)] = if self.early_exercise {
                    continuation.max(payoff.value(prices.price(j, i)))
                } else {
                    continuation
                };
            }
        }

        Ok(values)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
