//! `YieldTermStructure` — the curve interface seen by models and engines.
//!
//! A curve is described by its continuously-compounded zero yield `y(t)` and
//! the derivative `y'(t)`. Discount factors follow from the yield as
//! `P(0,t) = exp(−y(t)·t)`.

use hw_core::{DiscountFactor, Rate, Real, Time};

/// A yield (interest-rate) term structure.
///
/// Implementations must be immutable once built and safe to share between
/// simulation workers.
pub trait YieldTermStructure: std::fmt::Debug + Send + Sync {
    /// Continuously-compounded zero yield `y(t)`.
    fn zero_rate(&self, t: Time) -> Rate;

    /// First derivative `dy/dt` of the zero yield.
    fn zero_rate_derivative(&self, t: Time) -> Real;

    /// Discount factor `P(0,t) = exp(−y(t)·t)`.
    fn discount(&self, t: Time) -> DiscountFactor {
        if t == 0.0 {
            return 1.0;
        }
        (-self.zero_rate(t) * t).exp()
    }
}
