//! Analytic benchmark by Jamshidian's decomposition.
//!
//! In a one-factor model every zero bond price is decreasing in the short
//! rate, so the receiver swaption (a call on the fixed-leg bond struck at
//! par) splits into a portfolio of zero-bond calls. With `r*` solving
//! `Σ c_j·P(τ, T_j, r*) = 1`,
//!
//! ```text
//! price = Σ c_j · ZBC(0; τ, T_j, P(τ, T_j, r*))
//! ```

use crate::benchmark::BenchmarkPricer;
use hw_core::{Price, Rate, Real, Result, Time, Volatility};
use hw_instruments::SwaptionSpec;
use hw_math::solvers1d::brent;
use hw_models::{hull_white_model::BondOptionType, HullWhite, ModelParameters, ShortRateModel};
use hw_termstructures::{YieldCurve, YieldTermStructure};
use std::sync::Arc;

const ROOT_ACCURACY: Real = 1e-14;
const INITIAL_BRACKET: Real = 0.5;
const MAX_BRACKET_EXPANSIONS: u32 = 8;

/// Closed-form Hull-White swaption pricer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JamshidianSwaptionEngine;

impl JamshidianSwaptionEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

impl BenchmarkPricer for JamshidianSwaptionEngine {
    fn price(
        &self,
        maturity: Time,
        tenor: Time,
        mean_reversion: Real,
        volatility: Volatility,
        fixed_rate: Rate,
        initial_rate: Rate,
    ) -> Result<Price> {
        let params = ModelParameters::new(mean_reversion, volatility, initial_rate)?;
        let spec = SwaptionSpec::new(maturity, tenor, 1.0, fixed_rate)?;
        let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::flat(initial_rate)?);
        let model = HullWhite::new(curve, params)?;

        let expiry = spec.european_exercise_time();
        let coupon = fixed_rate * tenor;
        let cash_flows: Vec<(Time, Real)> = spec
            .payment_times_after(1)
            .map(|t| (t, if t == maturity { 1.0 + coupon } else { coupon }))
            .collect();

        let excess = |r: Real| -> Real {
            cash_flows
                .iter()
                .map(|&(t, c)| c * model.discount_bond(expiry, t, r))
                .sum::<Real>()
                - 1.0
        };

        let mut half_width = INITIAL_BRACKET;
        let mut expansions = 0;
        while excess(-half_width) * excess(half_width) > 0.0 {
            expansions += 1;
            hw_core::ensure!(
                expansions <= MAX_BRACKET_EXPANSIONS,
                "no critical short rate within ±{half_width} for fixed rate {fixed_rate}"
            );
            half_width *= 2.0;
        }
        let r_star = brent(excess, -half_width, half_width, ROOT_ACCURACY)?;

        Ok(cash_flows
            .iter()
            .map(|&(t, c)| {
                let strike = model.discount_bond(expiry, t, r_star);
                c * model.discount_bond_option(BondOptionType::Call, strike, expiry, t)
            })
            .sum())
    }

    fn name(&self) -> &'static str {
        "jamshidian"
    }
}
