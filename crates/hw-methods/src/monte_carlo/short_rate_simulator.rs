//! Euler simulation of the calibrated Hull-White short rate.

use super::{MonteCarloSettings, ShockMatrix};
use hw_core::{errors::Error, Rate, Real, Result, Size, Time};
use hw_math::PathMatrix;
use hw_processes::{HullWhiteProcess, StochasticProcess1D};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Simulated short rates indexed `[path][step]`; step `k` is time `k·dt`.
#[derive(Debug, Clone)]
pub struct PathEnsemble {
    rates: PathMatrix,
    steps_per_year: Size,
}

impl PathEnsemble {
    /// Number of paths.
    pub fn paths(&self) -> Size {
        self.rates.paths()
    }

    /// Number of simulated points per path.
    pub fn steps(&self) -> Size {
        self.rates.columns()
    }

    /// Step density.
    pub fn steps_per_year(&self) -> Size {
        self.steps_per_year
    }

    /// Step width `dt`.
    pub fn dt(&self) -> Time {
        1.0 / self.steps_per_year as Real
    }

    /// The step holding time `t`: `⌊t · steps_per_year⌋`.
    pub fn step_index(&self, t: Time) -> Size {
        (t * self.steps_per_year as Real).floor() as Size
    }

    /// Short rate of `path` at `step`.
    pub fn rate(&self, path: Size, step: Size) -> Rate {
        self.rates.value(path, step)
    }

    /// All steps of one path.
    pub fn path(&self, i: Size) -> &[Rate] {
        self.rates.path(i)
    }

    /// The underlying grid.
    pub fn rates(&self) -> &PathMatrix {
        &self.rates
    }
}

/// Generates a [`PathEnsemble`] from a [`HullWhiteProcess`].
///
/// Each path is `r[0] = r0`, `r[k] = r[k−1] + Δr[k]` with the Euler
/// increment `Δr[k] = (θ(k·dt) − a·r[k−1])·dt + σ·√dt·Z[k]`; the shock in
/// column 0 is never used.
#[derive(Debug, Clone)]
pub struct ShortRateSimulator<'a> {
    process: &'a HullWhiteProcess,
    settings: MonteCarloSettings,
}

impl<'a> ShortRateSimulator<'a> {
    /// Create a simulator. The settings are validated here.
    pub fn new(process: &'a HullWhiteProcess, settings: MonteCarloSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { process, settings })
    }

    /// The simulation controls.
    pub fn settings(&self) -> &MonteCarloSettings {
        &self.settings
    }

    /// Draw antithetic shocks from the configured seed and simulate.
    pub fn simulate(&self) -> Result<PathEnsemble> {
        let s = &self.settings;
        let shocks = ShockMatrix::generate(s.paths, s.steps(), s.seed)?;
        self.simulate_with_shocks(&shocks)
    }

    /// Simulate one path per shock row. The same shocks always give
    /// bit-identical rates.
    ///
    /// # Errors
    /// * [`Error::Precondition`] if the shock rows are empty.
    /// * [`Error::NumericOverflow`] as soon as any path produces a NaN or
    ///   infinite rate.
    #[instrument(level = "debug", skip_all, fields(paths = shocks.paths(), steps = shocks.steps()))]
    pub fn simulate_with_shocks(&self, shocks: &ShockMatrix) -> Result<PathEnsemble> {
        let (paths, steps) = (shocks.paths(), shocks.steps());
        hw_core::ensure!(steps > 0, "shock rows need at least one step");
        let dt = self.settings.dt();

        let mut data = vec![0.0; paths * steps];
        data.par_chunks_mut(steps)
            .enumerate()
            .try_for_each(|(p, row)| self.fill_path(p, shocks.path(p), dt, row))?;

        let rates = PathMatrix::from_path_major(paths, steps, data)?;
        debug!(paths, steps, dt, "short-rate ensemble simulated");
        Ok(PathEnsemble {
            rates,
            steps_per_year: self.settings.steps_per_year,
        })
    }

    fn fill_path(&self, path: Size, shocks: &[Real], dt: Time, row: &mut [Rate]) -> Result<()> {
        let process = self.process;
        row[0] = process.x0();
        for k in 1..row.len() {
            let t = k as Real * dt;
            let r = process.evolve_1d(t, row[k - 1], dt, shocks[k]);
            if !r.is_finite() {
                return Err(Error::NumericOverflow {
                    path,
                    step: k,
                    detail: format!(
                        "short rate {r} (a = {}, sigma = {}, dt = {dt})",
                        process.a(),
                        process.sigma()
                    ),
                });
            }
            row[k] = r;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hw_termstructures::{YieldCurve, YieldTermStructure};
    use std::sync::Arc;

    fn process(a: Real, sigma: Real) -> HullWhiteProcess {
        let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::flat(0.04).unwrap());
        HullWhiteProcess::new(curve, a, sigma, 0.04).unwrap()
    }

    fn settings(paths: Size) -> MonteCarloSettings {
        MonteCarloSettings {
            paths,
            steps_per_year: 50,
            horizon: 2.0,
            seed: 11,
        }
    }

    #[test]
    fn ensemble_shape_and_initial_rate() {
        let p = process(0.01, 0.01);
        let ens = ShortRateSimulator::new(&p, settings(10)).unwrap().simulate().unwrap();
        assert_eq!(ens.paths(), 10);
        assert_eq!(ens.steps(), 100);
        assert_eq!(ens.dt(), 0.02);
        assert_eq!(ens.step_index(0.5), 25);
        for i in 0..10 {
            assert_eq!(ens.rate(i, 0), 0.04);
        }
    }

    #[test]
    fn follows_the_euler_recursion() {
        let p = process(0.05, 0.01);
        let ens = ShortRateSimulator::new(&p, settings(4)).unwrap().simulate().unwrap();
        let shocks = ShockMatrix::generate(4, 100, 11).unwrap();
        let dt = 0.02;
        for i in 0..4 {
            let (r, z) = (ens.path(i), shocks.path(i));
            for k in 1..100 {
                let t = k as Real * dt;
                let dr = (p.theta(t) - 0.05 * r[k - 1]) * dt + 0.01 * dt.sqrt() * z[k];
                assert_eq!(r[k], r[k - 1] + dr);
            }
        }
    }

    #[test]
    fn first_increments_of_antithetic_pairs_average_to_the_drift() {
        let p = process(0.01, 0.01);
        let ens = ShortRateSimulator::new(&p, settings(6)).unwrap().simulate().unwrap();
        let drift = (p.theta(0.02) - 0.01 * 0.04) * 0.02;
        for i in 0..3 {
            let up = ens.rate(i, 1) - ens.rate(i, 0);
            let down = ens.rate(i + 3, 1) - ens.rate(i + 3, 0);
            assert_abs_diff_eq!(0.5 * (up + down), drift, epsilon = 1e-16);
        }
    }

    #[test]
    fn zero_shocks_give_coinciding_paths() {
        let p = process(0.1, 0.01);
        let sim = ShortRateSimulator::new(&p, settings(4)).unwrap();
        let shocks = ShockMatrix::from_matrix(PathMatrix::zeros(4, settings(4).steps())).unwrap();
        let ens = sim.simulate_with_shocks(&shocks).unwrap();
        for i in 1..4 {
            assert_eq!(ens.path(i), ens.path(0));
        }
    }

    #[test]
    fn explosive_euler_step_is_reported() {
        // a·dt = 500 makes the scheme oscillate with growing amplitude
        let p = process(500.0, 0.01);
        let s = MonteCarloSettings {
            paths: 2,
            steps_per_year: 1,
            horizon: 200.0,
            seed: 3,
        };
        let err = ShortRateSimulator::new(&p, s).unwrap().simulate().unwrap_err();
        match err {
            Error::NumericOverflow { step, detail, .. } => {
                assert!(step > 1);
                assert!(detail.contains("a = 500"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
