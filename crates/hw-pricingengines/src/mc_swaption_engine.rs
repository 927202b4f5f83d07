//! Monte Carlo pricing of the European swaption.
//!
//! The option is exercised at the first tenor date `τ`. On every path the
//! payoff `max(V(τ), 0)` is discounted with the simulated short rate over the
//! periods before exercise, and the estimate is the plain path average.

use crate::swap_valuator::{SwapValueMatrix, SwapValuator};
use hw_core::{Price, Real, Result, Size, Time};
use hw_instruments::SwaptionSpec;
use hw_math::Statistics;
use hw_methods::{
    ForwardRateAggregator, ForwardRateMatrix, MonteCarloSettings, PathEnsemble, ShortRateSimulator,
};
use hw_models::HullWhite;
use rayon::prelude::*;
use tracing::{info, instrument};

/// Outcome of a Monte Carlo pricing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McSwaptionResult {
    /// Mean discounted payoff over all paths.
    pub estimate: Price,
    /// Standard error of the estimate, measured on antithetic pair averages.
    pub std_error: Real,
    /// Number of simulated paths.
    pub paths: Size,
    /// Exercise date of the option.
    pub exercise_time: Time,
}

/// Averages discounted European payoffs.
#[derive(Debug, Clone, Copy)]
pub struct SwaptionMonteCarloEstimator {
    exercise_time: Time,
    exercise_periods: Size,
}

impl SwaptionMonteCarloEstimator {
    /// Estimator for exercise at the first tenor date of `spec`.
    pub fn european(spec: &SwaptionSpec) -> Self {
        let exercise_time = spec.european_exercise_time();
        Self {
            exercise_time,
            exercise_periods: (exercise_time / spec.tenor).round() as Size,
        }
    }

    /// Discounted payoff of every path, in path order.
    pub fn discounted_payoffs(
        &self,
        swaps: &SwapValueMatrix,
        forwards: &ForwardRateMatrix,
    ) -> Result<Vec<Real>> {
        hw_core::ensure!(
            swaps.paths() == forwards.paths(),
            "swap values cover {} paths but discount exponents cover {}",
            swaps.paths(),
            forwards.paths()
        );
        hw_core::ensure!(
            forwards.periods() >= self.exercise_periods,
            "need {} discount periods, got {}",
            self.exercise_periods,
            forwards.periods()
        );
        Ok((0..swaps.paths())
            .into_par_iter()
            .map(|p| swaps.value(p, 0).max(0.0) * forwards.discount(p, self.exercise_periods))
            .collect())
    }

    /// Estimate the swaption value.
    ///
    /// Paths `i` and `i + n/2` are antithetic partners; the standard error is
    /// computed on their averages, which are independent.
    pub fn estimate(
        &self,
        swaps: &SwapValueMatrix,
        forwards: &ForwardRateMatrix,
    ) -> Result<McSwaptionResult> {
        let payoffs = self.discounted_payoffs(swaps, forwards)?;
        let n = payoffs.len();
        hw_core::ensure!(n > 0 && n % 2 == 0, "antithetic estimate needs an even path count, got {n}");

        let half = n / 2;
        let mut pairs = Statistics::new();
        pairs.extend((0..half).map(|i| 0.5 * (payoffs[i] + payoffs[i + half])));

        Ok(McSwaptionResult {
            estimate: payoffs.iter().sum::<Real>() / n as Real,
            std_error: pairs.error_estimate().unwrap_or(0.0),
            paths: n,
            exercise_time: self.exercise_time,
        })
    }
}

/// Runs the whole simulation pipeline for one swaption:
/// short rates → discount exponents and swap values → estimate.
#[derive(Debug, Clone)]
pub struct MonteCarloSwaptionEngine<'a> {
    model: &'a HullWhite,
    spec: SwaptionSpec,
    settings: MonteCarloSettings,
}

impl<'a> MonteCarloSwaptionEngine<'a> {
    /// Create the engine.
    pub fn new(model: &'a HullWhite, spec: SwaptionSpec, settings: MonteCarloSettings) -> Result<Self> {
        spec.validate()?;
        settings.validate()?;
        Ok(Self {
            model,
            spec,
            settings,
        })
    }

    /// Simulate with the configured seed and price.
    #[instrument(skip_all, fields(paths = self.settings.paths, seed = self.settings.seed))]
    pub fn calculate(&self) -> Result<McSwaptionResult> {
        let ensemble = ShortRateSimulator::new(self.model.process(), self.settings)?.simulate()?;
        self.calculate_on(&ensemble)
    }

    /// Price on an already simulated ensemble.
    ///
    /// The standard error assumes paths `i` and `i + n/2` were driven by
    /// negated shocks, as [`ShockMatrix::generate`] and
    /// [`ShockMatrix::from_half`] guarantee.
    ///
    /// [`ShockMatrix::generate`]: hw_methods::ShockMatrix::generate
    /// [`ShockMatrix::from_half`]: hw_methods::ShockMatrix::from_half
    pub fn calculate_on(&self, ensemble: &PathEnsemble) -> Result<McSwaptionResult> {
        let forwards =
            ForwardRateAggregator::new(self.spec.tenor, self.spec.periods())?.aggregate(ensemble)?;
        let swaps = SwapValuator::new(self.model, self.spec)?.value(ensemble)?;
        let result = SwaptionMonteCarloEstimator::european(&self.spec).estimate(&swaps, &forwards)?;
        info!(
            estimate = result.estimate,
            std_error = result.std_error,
            paths = result.paths,
            "monte carlo swaption estimate"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hw_math::PathMatrix;
    use hw_methods::ShockMatrix;
    use hw_models::ModelParameters;
    use hw_termstructures::{YieldCurve, YieldTermStructure};
    use std::sync::Arc;

    fn model(sigma: Real) -> HullWhite {
        let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::flat(0.04).unwrap());
        HullWhite::new(curve, ModelParameters::new(0.01, sigma, 0.04).unwrap()).unwrap()
    }

    fn settings(paths: Size) -> MonteCarloSettings {
        MonteCarloSettings {
            paths,
            steps_per_year: 50,
            horizon: 5.0,
            seed: 17,
        }
    }

    #[test]
    fn estimate_is_the_mean_of_discounted_positive_parts() {
        let hw = model(0.01);
        let spec = SwaptionSpec::default();
        let engine = MonteCarloSwaptionEngine::new(&hw, spec, settings(200)).unwrap();
        let ensemble = ShortRateSimulator::new(hw.process(), settings(200))
            .unwrap()
            .simulate()
            .unwrap();
        let result = engine.calculate_on(&ensemble).unwrap();

        let swaps = SwapValuator::new(&hw, spec).unwrap().value(&ensemble).unwrap();
        let fwd = ForwardRateAggregator::new(0.5, 10).unwrap().aggregate(&ensemble).unwrap();
        let manual: Real = (0..200)
            .map(|p| swaps.value(p, 0).max(0.0) * (-fwd.exponent(p, 0)).exp())
            .sum::<Real>()
            / 200.0;
        assert_abs_diff_eq!(result.estimate, manual, epsilon = 1e-15);
        assert_eq!(result.paths, 200);
        assert_eq!(result.exercise_time, 0.5);
        assert!(result.std_error > 0.0);
    }

    #[test]
    fn same_seed_same_estimate() {
        let hw = model(0.01);
        let engine = MonteCarloSwaptionEngine::new(&hw, SwaptionSpec::default(), settings(100)).unwrap();
        assert_eq!(engine.calculate().unwrap(), engine.calculate().unwrap());
    }

    #[test]
    fn deep_out_of_the_money_is_worthless() {
        let hw = model(0.001);
        let spec = SwaptionSpec::new(5.0, 0.5, 1.0, 0.0).unwrap();
        let result = MonteCarloSwaptionEngine::new(&hw, spec, settings(100))
            .unwrap()
            .calculate()
            .unwrap();
        assert_eq!(result.estimate, 0.0);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn zero_shocks_give_the_intrinsic_value() {
        let hw = model(0.01);
        let spec = SwaptionSpec::new(5.0, 0.5, 1.0, 0.05).unwrap();
        let shocks = ShockMatrix::from_matrix(PathMatrix::zeros(2, 250)).unwrap();
        let ensemble = ShortRateSimulator::new(hw.process(), settings(2))
            .unwrap()
            .simulate_with_shocks(&shocks)
            .unwrap();
        let result = MonteCarloSwaptionEngine::new(&hw, spec, settings(2))
            .unwrap()
            .calculate_on(&ensemble)
            .unwrap();
        assert!(result.estimate > 0.0);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let hw = model(0.01);
        let spec = SwaptionSpec::default();
        let small = ShortRateSimulator::new(hw.process(), settings(2)).unwrap().simulate().unwrap();
        let large = ShortRateSimulator::new(hw.process(), settings(4)).unwrap().simulate().unwrap();
        let swaps = SwapValuator::new(&hw, spec).unwrap().value(&small).unwrap();
        let fwd = ForwardRateAggregator::new(0.5, 10).unwrap().aggregate(&large).unwrap();
        assert!(SwaptionMonteCarloEstimator::european(&spec).estimate(&swaps, &fwd).is_err());
    }
}
