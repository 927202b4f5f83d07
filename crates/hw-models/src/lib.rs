//! # hw-models
//!
//! The Hull-White one-factor model: validated parameters, the short-rate
//! model traits and the affine zero-coupon bond formula.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Hull-White one-factor model with affine bond prices.
pub mod hull_white_model;

/// Validated `(a, σ, r0)` parameter set.
pub mod model_parameters;

/// Short-rate model traits.
pub mod short_rate_model;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use hull_white_model::HullWhite;
pub use model_parameters::ModelParameters;
pub use short_rate_model::{OneFactorModel, ShortRateModel};
