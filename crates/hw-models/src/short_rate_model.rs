//! Short-rate model traits.
//!
//! ```text
//! ShortRateModel      P(s, t | r_s)
//! └── OneFactorModel  dr = μ(t,r) dt + σ(t,r) dW
//! ```

use hw_core::{DiscountFactor, Real, Time};
use hw_processes::StochasticProcess1D;
use hw_termstructures::YieldTermStructure;
use std::sync::Arc;

/// A short-rate model with closed-form zero-coupon bond prices.
pub trait ShortRateModel: std::fmt::Debug + Send + Sync {
    /// Price at time `s` of a zero-coupon bond maturing at `t`, given the
    /// short rate `rate` observed at `s`.
    fn discount_bond(&self, s: Time, t: Time, rate: Real) -> DiscountFactor;

    /// The initial yield curve the model is fitted to.
    fn term_structure(&self) -> &Arc<dyn YieldTermStructure>;
}

/// A one-factor short-rate model.
pub trait OneFactorModel: ShortRateModel {
    /// Instantaneous drift `μ(t, r)`.
    fn short_rate_drift(&self, t: Time, r: Real) -> Real {
        self.dynamics().drift_1d(t, r)
    }

    /// Instantaneous diffusion `σ(t, r)`.
    fn short_rate_diffusion(&self, t: Time, r: Real) -> Real {
        self.dynamics().diffusion_1d(t, r)
    }

    /// The short-rate process simulated by path generators.
    fn dynamics(&self) -> &dyn StochasticProcess1D;
}
