//! Probability distributions.
//!
//! Only the standard normal is needed here; it delegates to `statrs`.

pub mod normal;

pub use normal::{normal_cdf, normal_pdf};
