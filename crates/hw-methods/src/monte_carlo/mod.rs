//! Monte Carlo simulation of the Hull-White short rate.
//!
//! # Overview
//!
//! * [`ShockMatrix`] — antithetic standard-normal shocks, one row per path
//! * [`ShortRateSimulator`] — Euler paths of the calibrated process, in parallel
//! * [`PathEnsemble`] — the simulated `[path][step]` short-rate grid
//! * [`ForwardRateAggregator`] — per-tenor Riemann sums of `r·dt`
//!
//! Every stage reads the previous stage's complete output and writes a fresh,
//! preallocated path-major grid. Paths are filled independently by index, so
//! results do not depend on how rayon schedules the work.

mod forward_rates;
mod shocks;
mod short_rate_simulator;

pub use forward_rates::{ForwardRateAggregator, ForwardRateMatrix};
pub use shocks::ShockMatrix;
pub use short_rate_simulator::{PathEnsemble, ShortRateSimulator};

use hw_core::{errors::Error, Real, Result, Size, Time};
use serde::{Deserialize, Serialize};

/// Simulation controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSettings {
    /// Number of paths; must be even and non-zero.
    pub paths: Size,
    /// Time steps per year; `dt = 1 / steps_per_year`.
    pub steps_per_year: Size,
    /// Simulated time span in years.
    pub horizon: Time,
    /// Seed of the Mersenne Twister shock generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    42
}

impl MonteCarloSettings {
    /// Check the controls.
    ///
    /// # Errors
    /// [`Error::InvalidEnsembleSize`] for an odd or zero path count,
    /// [`Error::InvalidArgument`] for a zero step density or a non-positive
    /// horizon.
    pub fn validate(&self) -> Result<()> {
        check_ensemble_size(self.paths)?;
        if self.steps_per_year == 0 {
            return Err(Error::InvalidArgument(
                "steps per year must be positive".into(),
            ));
        }
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        Ok(())
    }

    /// Step width `dt`.
    pub fn dt(&self) -> Time {
        1.0 / self.steps_per_year as Real
    }

    /// Number of simulated points per path, `round(horizon · steps_per_year)`.
    pub fn steps(&self) -> Size {
        ((self.horizon * self.steps_per_year as Real).round() as Size).max(1)
    }
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            paths: 20_000,
            steps_per_year: 100,
            horizon: 5.0,
            seed: default_seed(),
        }
    }
}

/// Antithetic pairing needs an even, non-zero number of paths.
pub(crate) fn check_ensemble_size(paths: Size) -> Result<()> {
    if paths == 0 || paths % 2 != 0 {
        return Err(Error::InvalidEnsembleSize { paths });
    }
    Ok(())
}
