//! Recombining trinomial price grid.
//!
//! Row `N` is the middle of the band and holds `S0` at every step. Row
//! `N − k` holds `S0 · u^k` and row `N + k` holds `S0 · d^k` from step `k`
//! onwards, since a middle move leaves the price unchanged.

use ol_core::{Real, Size};
use ol_math::Matrix;

/// Fill a `(2N+1) × (N+1)` grid.
///
/// At step `i` the band widens by one row on each side: the new outermost
/// node is the previous step's outermost node moved by `u` (above) or `d`
/// (below), and it keeps that value at every later step.
pub(crate) fn grow(spot: Real, up: Real, down: Real, steps: Size) -> Matrix {
    let n = steps;
    let mut grid = Matrix::zeros(2 * n + 1, n + 1);
    for step in 0..=n {
        grid[(n, step)] = spot;
    }
    for i in 1..=n {
        let above = grid[(n - i + 1, i - 1)] * up;
        let below = grid[(n + i - 1, i - 1)] * down;
        for step in i..=n {
            grid[(n - i, step)] = above;
            grid[(n + i, step)] = below;
        }
    }
    grid
}
