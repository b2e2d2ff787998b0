//! Option values over a lattice.

use ol_core::{Real, Size};
use ol_instruments::Payoff;
use ol_math::Matrix;

use super::{LatticeShape, PriceLattice};

/// Grid of option values with the same shape as the [`PriceLattice`] it
/// was evaluated on.
///
/// Filled terminal column first, then backwards by
/// [`BackwardInductor`](super::BackwardInductor). Only lives for one pricing
/// call; the answer is the single root cell at step 0.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionValueLattice {
    shape: LatticeShape,
    steps: Size,
    pub(crate) values: Matrix,
}

impl OptionValueLattice {
    /// Evaluate `payoff` on every node of the terminal column of `prices`.
    ///
    /// Earlier columns start at zero and are filled by backward induction.
    pub fn terminal(prices: &PriceLattice, payoff: &dyn Payoff) -> Self {
        let (rows, cols) = prices.dimensions();
        let n = prices.steps();
        let mut values = Matrix::zeros(rows, cols);
        for (level, price) in prices.terminal_prices().into_iter().enumerate() {
            values[(level, n)] = payoff.value(price);
        }
        Self {
            shape: prices.shape(),
            steps: n,
            values,
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
        self.values.shape()
    }

    /// Option value at `(level, step)`.
    pub fn value(&self, level: Size, step: Size) -> Real {
        self.values[(level, step)]
    }

    /// Value at the root node (the present value once induction is done).
    pub fn root_value(&self) -> Real {
        self.values[(self.shape.root_level(self.steps), 0)]
    }
}
