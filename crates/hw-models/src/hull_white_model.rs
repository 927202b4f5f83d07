//! Hull-White (extended Vasicek) one-factor model.
//!
//! ```text
//! dr = (θ(t) − a·r) dt + σ dW
//! ```
//!
//! Zero-coupon bonds have the affine closed form
//!
//! ```text
//! P(s,t) = A(s,t)·exp(−B(s,t)·r_s)
//! B(s,t) = (1 − e^{a(s−t)}) / a
//! A(s,t) = P(0,t)/P(0,s) · exp(B(s,t)·y(s) − σ²/(4a)·B(s,t)²·(1 − e^{−2as}))
//! ```
//!
//! with `P(0,x) = e^{−y(x)·x}` from the zero-yield curve `y`. The bond
//! formula is evaluated once per path, exercise date and cash flow, so it is
//! kept allocation-free.

use crate::{
    model_parameters::ModelParameters,
    short_rate_model::{OneFactorModel, ShortRateModel},
};
use hw_core::{DiscountFactor, Price, Real, Result, Time};
use hw_math::normal_cdf;
use hw_processes::{HullWhiteProcess, StochasticProcess1D};
use hw_termstructures::YieldTermStructure;
use std::sync::Arc;

/// Call or put on a zero-coupon bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOptionType {
    /// Right to buy the bond at the strike.
    Call,
    /// Right to sell the bond at the strike.
    Put,
}

/// Hull-White one-factor model fitted to a yield curve.
#[derive(Debug, Clone)]
pub struct HullWhite {
    params: ModelParameters,
    process: HullWhiteProcess,
}

impl HullWhite {
    /// Create the model. The parameters are validated first.
    pub fn new(curve: Arc<dyn YieldTermStructure>, params: ModelParameters) -> Result<Self> {
        params.validate()?;
        let process = HullWhiteProcess::new(
            curve,
            params.mean_reversion,
            params.volatility,
            params.initial_short_rate,
        )?;
        Ok(Self { params, process })
    }

    /// Model parameters.
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// The calibrated short-rate process.
    pub fn process(&self) -> &HullWhiteProcess {
        &self.process
    }

    /// Calibrated drift `θ(t)`.
    pub fn theta(&self, t: Time) -> Real {
        self.process.theta(t)
    }

    /// `B(s,t) = (1 − e^{a(s−t)}) / a`. Exactly zero for `s == t`.
    pub fn b_function(&self, s: Time, t: Time) -> Real {
        let a = self.params.mean_reversion;
        (1.0 - (a * (s - t)).exp()) / a
    }

    /// `ln A(s,t)`.
    pub fn log_a(&self, s: Time, t: Time) -> Real {
        let a = self.params.mean_reversion;
        let sigma = self.params.volatility;
        let curve = self.term_structure();
        let b = self.b_function(s, t);
        let y_s = curve.zero_rate(s);
        let ln_p0t = -curve.zero_rate(t) * t;
        let ln_p0s = -y_s * s;

        (ln_p0t - ln_p0s) + b * y_s
            - sigma * sigma / (4.0 * a) * b * b * (1.0 - (-2.0 * a * s).exp())
    }

    /// `A(s,t)`.
    pub fn a_function(&self, s: Time, t: Time) -> Real {
        self.log_a(s, t).exp()
    }

    /// Standard deviation of `ln P(T,S)` seen from time 0.
    fn bond_log_std_dev(&self, maturity: Time, bond_maturity: Time) -> Real {
        let a = self.params.mean_reversion;
        let sigma = self.params.volatility;
        sigma * ((1.0 - (-2.0 * a * maturity).exp()) / (2.0 * a)).sqrt()
            * self.b_function(maturity, bond_maturity)
    }

    /// Time-0 price of a European option expiring at `maturity` on a
    /// zero-coupon bond maturing at `bond_maturity`, per unit bond notional.
    pub fn discount_bond_option(
        &self,
        option_type: BondOptionType,
        strike: Real,
        maturity: Time,
        bond_maturity: Time,
    ) -> Price {
        let curve = self.term_structure();
        let p_t = curve.discount(maturity);
        let p_s = curve.discount(bond_maturity);
        let v = self.bond_log_std_dev(maturity, bond_maturity);

        if v <= 0.0 {
            let forward = p_s - strike * p_t;
            return match option_type {
                BondOptionType::Call => forward.max(0.0),
                BondOptionType::Put => (-forward).max(0.0),
            };
        }

        let h = (p_s / (p_t * strike)).ln() / v + 0.5 * v;
        match option_type {
            BondOptionType::Call => p_s * normal_cdf(h) - strike * p_t * normal_cdf(h - v),
            BondOptionType::Put => strike * p_t * normal_cdf(v - h) - p_s * normal_cdf(-h),
        }
    }
}

impl ShortRateModel for HullWhite {
    fn discount_bond(&self, s: Time, t: Time, rate: Real) -> DiscountFactor {
        (self.log_a(s, t) - self.b_function(s, t) * rate).exp()
    }

    fn term_structure(&self) -> &Arc<dyn YieldTermStructure> {
        self.process.curve()
    }
}

impl OneFactorModel for HullWhite {
    fn dynamics(&self) -> &dyn StochasticProcess1D {
        &self.process
    }
}
