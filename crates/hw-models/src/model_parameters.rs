//! `ModelParameters` — the Hull-White parameter set `(a, σ, r0)`.

use hw_core::{errors::Error, Rate, Real, Result, Volatility};
use hw_processes::hull_white_process::MIN_MEAN_REVERSION;
use serde::{Deserialize, Serialize};

/// Hull-White parameters shared by the simulation, the bond formula and the
/// benchmark engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Mean-reversion speed `a`.
    pub mean_reversion: Real,
    /// Short-rate volatility `σ`.
    pub volatility: Volatility,
    /// Initial short rate `r0`.
    pub initial_short_rate: Rate,
}

impl ModelParameters {
    /// Build and validate a parameter set.
    pub fn new(mean_reversion: Real, volatility: Volatility, initial_short_rate: Rate) -> Result<Self> {
        let params = Self {
            mean_reversion,
            volatility,
            initial_short_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameter invariants.
    ///
    /// # Errors
    /// * [`Error::SingularModel`] if `|a|` is below the singularity threshold
    ///   or `a` is not finite.
    /// * [`Error::InvalidArgument`] if `a < 0`, `σ ≤ 0` or `r0` is not finite.
    pub fn validate(&self) -> Result<()> {
        let a = self.mean_reversion;
        if !a.is_finite() || a.abs() < MIN_MEAN_REVERSION {
            return Err(Error::SingularModel { mean_reversion: a });
        }
        if a < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "mean reversion must be positive, got {a}"
            )));
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "volatility must be positive, got {}",
                self.volatility
            )));
        }
        if !self.initial_short_rate.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "initial short rate must be finite, got {}",
                self.initial_short_rate
            )));
        }
        Ok(())
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            mean_reversion: 0.01,
            volatility: 0.01,
            initial_short_rate: 0.04,
        }
    }
}
