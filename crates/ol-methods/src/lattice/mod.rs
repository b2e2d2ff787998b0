//! Lattice methods for option pricing.
//!
//! A pricing call flows strictly one way through this module:
//!
//! 1. [`ProbabilityCalibrator`]: move factors and risk-neutral probabilities
//! 2. [`PriceLattice::build`]: the underlying-price grid
//! 3. [`OptionValueLattice::terminal`]: payoff at every leaf
//! 4. [`BackwardInductor::roll_back`]: discounted expectation back to the root
//!
//! Grids are stored densely as `(level, step)`. A binomial lattice is
//! `(N+1) × (N+1)` with level `j ∈ [0, i]` live at step `i`; a trinomial
//! lattice is `(2N+1) × (N+1)` with level `j ∈ [N−i, N+i]` live at step `i`
//! and `S0` on the middle row `N`.

pub mod binomial_tree;
pub mod calibration;
pub mod induction;
pub mod option_values;
pub mod trinomial_tree;

pub use calibration::{CalibratedFactors, ProbabilityCalibrator};
pub use induction::BackwardInductor;
pub use option_values::OptionValueLattice;

use ol_core::{Real, Size};
use ol_math::Matrix;
use std::ops::RangeInclusive;

// ─── LatticeShape ─────────────────────────────────────────────────────────────

/// Branching structure of a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatticeShape {
    /// Two branches per node; triangular grid.
    Binomial,
    /// Three branches per node; symmetric band around the middle row.
    Trinomial,
}

impl LatticeShape {
    /// Shape matching the branch count of `factors`.
    pub fn of(factors: &CalibratedFactors) -> Self {
        if factors.method.is_binomial() {
            LatticeShape::Binomial
        } else {
            LatticeShape::Trinomial
        }
    }

    /// Number of grid rows for a `steps`-step lattice.
    pub fn rows(self, steps: Size) -> Size {
        match self {
            LatticeShape::Binomial => steps + 1,
            LatticeShape::Trinomial => 2 * steps + 1,
        }
    }

    /// Live levels at `step` of a `steps`-step lattice.
    pub fn levels(self, steps: Size, step: Size) -> RangeInclusive<Size> {
        match self {
            LatticeShape::Binomial => 0..=step,
            LatticeShape::Trinomial => (steps - step)..=(steps + step),
        }
    }

    /// Level of the single node at step 0.
    pub fn root_level(self, steps: Size) -> Size {
        match self {
            LatticeShape::Binomial => 0,
            LatticeShape::Trinomial => steps,
        }
    }
}

// ─── PriceLattice ─────────────────────────────────────────────────────────────

/// Grid of underlying prices indexed by `(level, step)`.
///
/// Built once per pricing call and read-only afterwards. Cells outside the
/// live band of a step are zero and carry no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLattice {
    shape: LatticeShape,
    steps: Size,
    prices: Matrix,
}

impl PriceLattice {
    /// Expand the underlying-price tree from `spot` with the calibrated
    /// move factors over `steps` steps.
    ///
    /// Deterministic and side-effect free.
    pub fn build(spot: Real, factors: &CalibratedFactors, steps: Size) -> Self {
        let shape = LatticeShape::of(factors);
        let prices = match shape {
            LatticeShape::Binomial => {
                binomial_tree::grow(spot, factors.up, factors.down, steps)
            }
            LatticeShape::Trinomial => {
                trinomial_tree::grow(spot, factors.up, factors.down, steps)
            }
        };
        Self {
            shape,
            steps,
            prices,
        }
    }

    /// Branching structure.
    pub fn shape(&self) -> LatticeShape {
        self.shape
    }

    /// Number of time steps `N`.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// `(rows, columns)` of the backing grid.
    pub fn dimensions(&self) -> (Size, Size) {
        self.prices.shape()
    }

    /// Live levels at `step`.
    pub fn levels(&self, step: Size) -> RangeInclusive<Size> {
        self.shape.levels(self.steps, step)
    }

    /// Level of the root node.
    pub fn root_level(&self) -> Size {
        self.shape.root_level(self.steps)
    }

    /// Underlying price at `(level, step)`.
    pub fn price(&self, level: Size, step: Size) -> Real {
        self.prices[(level, step)]
    }

    /// Underlying prices at maturity, one per row.
    pub fn terminal_prices(&self) -> Vec<Real> {
        self.prices.column(self.steps)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
