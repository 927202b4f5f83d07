//! Zero-level Ornstein-Uhlenbeck process `dx = −a·x dt + σ dW`, `x(0) = 0`.
//!
//! This is the Hull-White short rate with the deterministic shift removed;
//! the trinomial lattice is built on it and the shift is fitted afterwards.
//! Both conditional moments are exact:
//!
//! ```text
//! E[x(t+Δt) | x(t)]   = x(t)·e^{−aΔt}
//! Var[x(t+Δt) | x(t)] = σ²·(1 − e^{−2aΔt}) / (2a)
//! ```

use crate::stochastic_process::StochasticProcess1D;
use hw_core::{Real, Result, Time, Volatility};

/// Ornstein-Uhlenbeck process reverting to zero.
#[derive(Debug, Clone, Copy)]
pub struct OrnsteinUhlenbeckProcess {
    speed: Real,
    volatility: Volatility,
}

impl OrnsteinUhlenbeckProcess {
    /// Create the process. Requires `speed > 0` and `volatility ≥ 0`.
    pub fn new(speed: Real, volatility: Volatility) -> Result<Self> {
        hw_core::ensure!(
            speed.is_finite() && speed > 0.0,
            "mean-reversion speed must be positive, got {speed}"
        );
        hw_core::ensure!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be non-negative, got {volatility}"
        );
        Ok(Self { speed, volatility })
    }

    /// Mean-reversion speed.
    pub fn speed(&self) -> Real {
        self.speed
    }

    /// Volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }
}

impl StochasticProcess1D for OrnsteinUhlenbeckProcess {
    fn x0(&self) -> Real {
        0.0
    }

    fn drift_1d(&self, _t: Time, x: Real) -> Real {
        -self.speed * x
    }

    fn diffusion_1d(&self, _t: Time, _x: Real) -> Real {
        self.volatility
    }

    fn expectation_1d(&self, _t: Time, x: Real, dt: Time) -> Real {
        x * (-self.speed * dt).exp()
    }

    fn variance_1d(&self, _t: Time, _x: Real, dt: Time) -> Real {
        let a = self.speed;
        self.volatility * self.volatility * (1.0 - (-2.0 * a * dt).exp()) / (2.0 * a)
    }
}
