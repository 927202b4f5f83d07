//! # hw-math
//!
//! Mathematical utilities: cubic-spline interpolation with derivatives,
//! path-major matrices (over nalgebra), the normal distribution (via statrs),
//! Mersenne-Twister random numbers, root finding and statistics.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// 1D interpolation schemes.
pub mod interpolations;

/// Path-major matrices for simulated grids.
pub mod matrix;

/// Random number generators.
pub mod random_numbers;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use interpolations::{Interpolation1D, NaturalCubicSpline};
pub use matrix::PathMatrix;
pub use random_numbers::{InverseCumulativeNormalRng, MersenneTwisterUniformRng};
pub use statistics::Statistics;
