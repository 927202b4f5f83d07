//! Probability distributions.
//!
//! Only the standard normal is needed: its inverse CDF turns uniform deviates
//! into Gaussian shocks and its CDF drives the analytic swaption benchmark.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
