//! # hw-termstructures
//!
//! Yield curves consumed by the Hull-White model, the Monte Carlo pipeline
//! and the benchmark engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `YieldTermStructure` — yield / interest-rate term structures.
pub mod yield_term_structure;

/// `YieldCurve` — zero yields interpolated by a natural cubic spline.
pub mod yield_curve;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use yield_curve::{CurvePoint, YieldCurve};
pub use yield_term_structure::YieldTermStructure;
