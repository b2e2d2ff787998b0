//! Recombining binomial price grid.
//!
//! Level 0 is the all-up path; each level below it swaps one up move for a
//! down move, so node `(j, i)` holds `S0 · u^(i−j) · d^j`.

use ol_core::{Real, Size};
use ol_math::Matrix;

/// Fill an `(N+1) × (N+1)` grid column by column.
///
/// The top node of each step grows from the previous top by `u`; every
/// other node is the previous step's node one level up, moved by `d`.
pub(crate) fn grow(spot: Real, up: Real, down: Real, steps: Size) -> Matrix {
    let mut grid = Matrix::zeros(steps + 1, steps + 1);
    grid[(0, 0)] = spot;
    for i in 1..=steps {
        grid[(0, i)] = grid[(0, i - 1)] * up;
        for j in 1..=i {
            grid[(j, i)] = grid[(j - 1, i - 1)] * down;
        }
    }
    grid
}
