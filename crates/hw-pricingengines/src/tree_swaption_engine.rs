//! Lattice benchmark for the European receiver swaption.
//!
//! The Hull-White short rate is represented on a trinomial tree of the
//! zero-level Ornstein-Uhlenbeck state, shifted layer by layer to reprice the
//! flat curve. The fixed-leg bond (coupons `K·τ` at `T_2, …, T_m` plus the
//! unit redemption at `T_m`) is rolled back to the exercise date `τ`, where
//! the receiver payoff is `max(bond − 1, 0)`; that payoff is rolled back to
//! the root.

use crate::benchmark::BenchmarkPricer;
use hw_core::{Price, Rate, Real, Result, Size, Time, Volatility};
use hw_instruments::SwaptionSpec;
use hw_methods::{ShortRateTree, TimeGrid, TrinomialTree};
use hw_models::ModelParameters;
use hw_processes::OrnsteinUhlenbeckProcess;
use hw_termstructures::YieldCurve;
use tracing::debug;

/// Trinomial-tree swaption pricer.
#[derive(Debug, Clone, Copy)]
pub struct TreeSwaptionEngine {
    steps_per_year: Size,
}

impl TreeSwaptionEngine {
    /// Lattice with roughly `steps_per_year` time steps per year.
    ///
    /// Each tenor period gets a whole number of steps so that every payment
    /// date is a layer of the tree.
    pub fn new(steps_per_year: Size) -> Result<Self> {
        hw_core::ensure!(steps_per_year > 0, "tree needs at least one step per year");
        Ok(Self { steps_per_year })
    }

    /// Configured steps per year.
    pub fn steps_per_year(&self) -> Size {
        self.steps_per_year
    }

    /// Steps per tenor period.
    pub fn steps_per_period(&self, tenor: Time) -> Size {
        ((self.steps_per_year as Real * tenor).round() as Size).max(1)
    }
}

impl Default for TreeSwaptionEngine {
    fn default() -> Self {
        Self { steps_per_year: 100 }
    }
}

impl BenchmarkPricer for TreeSwaptionEngine {
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
        let periods = spec.periods();
        let m = self.steps_per_period(tenor);

        let grid = TimeGrid::uniform(maturity, periods * m)?;
        let process = OrnsteinUhlenbeckProcess::new(params.mean_reversion, params.volatility)?;
        let curve = YieldCurve::flat(initial_rate)?;
        let tree = ShortRateTree::new(TrinomialTree::new(&process, &grid)?, &curve)?;

        let coupon = fixed_rate * tenor;
        let mut bond = vec![1.0 + coupon; tree.size(periods * m)];
        for j in (1..periods).rev() {
            bond = tree.rollback(bond, (j + 1) * m, j * m);
            if j >= 2 {
                bond.iter_mut().for_each(|v| *v += coupon);
            }
        }

        let payoff = bond.into_iter().map(|b| (b - 1.0).max(0.0)).collect();
        let root = tree.rollback(payoff, m, 0);
        hw_core::ensure_post!(root.len() == 1, "lattice rollback did not reach the root");
        debug!(steps = periods * m, price = root[0], "tree swaption price");
        Ok(root[0])
    }

    fn name(&self) -> &'static str {
        "trinomial tree"
    }
}
