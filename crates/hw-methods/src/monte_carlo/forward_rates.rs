//! Per-period discount exponents from simulated short rates.

use super::PathEnsemble;
use hw_core::{DiscountFactor, Real, Result, Size, Time};
use hw_math::PathMatrix;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Riemann sums `Σ r[k]·dt`, one per path and tenor period.
#[derive(Debug, Clone)]
pub struct ForwardRateMatrix {
    exponents: PathMatrix,
    tenor: Time,
}

impl ForwardRateMatrix {
    /// Number of paths.
    pub fn paths(&self) -> Size {
        self.exponents.paths()
    }

    /// Number of tenor periods.
    pub fn periods(&self) -> Size {
        self.exponents.columns()
    }

    /// Period length `τ`.
    pub fn tenor(&self) -> Time {
        self.tenor
    }

    /// Exponent of `path` for period `[i·τ, (i+1)·τ)`.
    pub fn exponent(&self, path: Size, period: Size) -> Real {
        self.exponents.value(path, period)
    }

    /// Pathwise discount factor over the first `periods` periods,
    /// `exp(−Σ_{i<periods} exponent(path, i))`.
    pub fn discount(&self, path: Size, periods: Size) -> DiscountFactor {
        let sum: Real = self.exponents.path(path)[..periods].iter().sum();
        (-sum).exp()
    }

    /// The underlying grid.
    pub fn matrix(&self) -> &PathMatrix {
        &self.exponents
    }
}

/// Integrates the short rate over consecutive tenor periods.
///
/// Period `i` covers `[t, t+τ)` with `t = i·τ` and sums the steps
/// `k ∈ [⌊t·spy⌋, ⌊(t+τ)·spy⌋)`. Period ends that fall between two steps are
/// truncated, not interpolated.
#[derive(Debug, Clone, Copy)]
pub struct ForwardRateAggregator {
    tenor: Time,
    periods: Size,
}

impl ForwardRateAggregator {
    /// Aggregate `periods` periods of length `tenor`.
    pub fn new(tenor: Time, periods: Size) -> Result<Self> {
        hw_core::ensure!(
            tenor.is_finite() && tenor > 0.0,
            "tenor must be positive, got {tenor}"
        );
        hw_core::ensure!(periods > 0, "need at least one tenor period");
        Ok(Self { tenor, periods })
    }

    /// Step range `[start, end)` of period `i` at `steps_per_year`.
    pub fn step_range(&self, i: Size, steps_per_year: Size) -> (Size, Size) {
        let spy = steps_per_year as Real;
        let t = i as Real * self.tenor;
        let start = (t * spy).floor() as Size;
        let end = ((t + self.tenor) * spy).floor() as Size;
        (start, end)
    }

    /// Compute the exponents for every path.
    ///
    /// # Errors
    /// [`hw_core::Error::Precondition`] if the last period ends beyond the
    /// simulated horizon.
    #[instrument(level = "debug", skip_all, fields(paths = ensemble.paths(), periods = self.periods))]
    pub fn aggregate(&self, ensemble: &PathEnsemble) -> Result<ForwardRateMatrix> {
        let spy = ensemble.steps_per_year();
        let ranges: Vec<(Size, Size)> =
            (0..self.periods).map(|i| self.step_range(i, spy)).collect();
        let last_end = ranges.last().map_or(0, |r| r.1);
        hw_core::ensure!(
            last_end <= ensemble.steps(),
            "period {} ends at step {last_end}, beyond the {} simulated steps",
            self.periods - 1,
            ensemble.steps()
        );

        let dt = ensemble.dt();
        let mut data = vec![0.0; ensemble.paths() * self.periods];
        data.par_chunks_mut(self.periods)
            .enumerate()
            .for_each(|(p, row)| {
                let rates = ensemble.path(p);
                for (slot, &(start, end)) in row.iter_mut().zip(&ranges) {
                    *slot = rates[start..end].iter().map(|r| r * dt).sum();
                }
            });

        debug!(periods = self.periods, dt, "forward-rate exponents aggregated");
        Ok(ForwardRateMatrix {
            exponents: PathMatrix::from_path_major(ensemble.paths(), self.periods, data)?,
            tenor: self.tenor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monte_carlo::{MonteCarloSettings, ShortRateSimulator};
    use approx::assert_abs_diff_eq;
    use hw_processes::HullWhiteProcess;
    use proptest::prelude::*;
    use hw_termstructures::{YieldCurve, YieldTermStructure};
    use std::sync::Arc;

    fn ensemble(steps_per_year: Size, horizon: Time) -> PathEnsemble {
        let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::flat(0.04).unwrap());
        let p = HullWhiteProcess::new(curve, 0.01, 0.01, 0.04).unwrap();
        let s = MonteCarloSettings {
            paths: 4,
            steps_per_year,
            horizon,
            seed: 5,
        };
        ShortRateSimulator::new(&p, s).unwrap().simulate().unwrap()
    }

    #[test]
    fn step_ranges_truncate() {
        let agg = ForwardRateAggregator::new(0.5, 10).unwrap();
        assert_eq!(agg.step_range(0, 100), (0, 50));
        assert_eq!(agg.step_range(3, 100), (150, 200));
        // 0.5 · 3 = 1.5 → steps [0, 1), [1, 3), [3, 4)
        assert_eq!(agg.step_range(0, 3), (0, 1));
        assert_eq!(agg.step_range(1, 3), (1, 3));
        assert_eq!(agg.step_range(2, 3), (3, 4));
    }

    #[test]
    fn exponents_are_riemann_sums() {
        let ens = ensemble(20, 2.0);
        let agg = ForwardRateAggregator::new(0.5, 4).unwrap();
        let fwd = agg.aggregate(&ens).unwrap();
        assert_eq!(fwd.paths(), 4);
        assert_eq!(fwd.periods(), 4);
        for p in 0..4 {
            for i in 0..4 {
                let expected: f64 = (10 * i..10 * (i + 1)).map(|k| ens.rate(p, k) * 0.05).sum();
                assert_eq!(fwd.exponent(p, i), expected);
            }
            let total: f64 = (0..2).map(|i| fwd.exponent(p, i)).sum();
            assert_abs_diff_eq!(fwd.discount(p, 2), (-total).exp(), epsilon = 1e-15);
            assert_eq!(fwd.discount(p, 0), 1.0);
        }
    }

    #[test]
    fn first_period_exponent_is_close_to_r_tau() {
        let ens = ensemble(100, 1.0);
        let fwd = ForwardRateAggregator::new(0.5, 2).unwrap().aggregate(&ens).unwrap();
        for p in 0..4 {
            assert_abs_diff_eq!(fwd.exponent(p, 0), 0.04 * 0.5, epsilon = 1e-2);
        }
    }

    #[test]
    fn periods_beyond_the_horizon_are_rejected() {
        let ens = ensemble(20, 1.0);
        let agg = ForwardRateAggregator::new(0.5, 3).unwrap();
        assert!(matches!(agg.aggregate(&ens), Err(hw_core::Error::Precondition(_))));
    }

    proptest! {
        #[test]
        fn step_ranges_tile_the_grid(periods in 1usize..40, spy in 1usize..400, quarters in 1usize..5) {
            let tenor = 0.25 * quarters as Real;
            let agg = ForwardRateAggregator::new(tenor, periods).unwrap();
            let mut expected_start = 0;
            for i in 0..periods {
                let (start, end) = agg.step_range(i, spy);
                prop_assert_eq!(start, expected_start);
                prop_assert!(end >= start);
                expected_start = end;
            }
        }
    }
}
