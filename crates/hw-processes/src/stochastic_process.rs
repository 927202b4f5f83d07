//! `StochasticProcess1D` — a scalar diffusion `dX = μ(t,X) dt + σ(t,X) dW`.
//!
//! The discretisation used by the Monte Carlo engine is the explicit Euler
//! scheme: the increment `ΔX = μ(t,X)·Δt + σ(t,X)·√Δt·Z` is formed first and
//! then added to the current state. Lattice builders use the conditional
//! moments instead, which processes with a closed form override.

use hw_core::{Real, Time};

/// A one-dimensional stochastic process.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// Drift `μ(t, x)`.
    fn drift_1d(&self, t: Time, x: Real) -> Real;

    /// Diffusion `σ(t, x)`.
    fn diffusion_1d(&self, t: Time, x: Real) -> Real;

    /// Conditional expectation `E[X(t+Δt) | X(t) = x]`.
    ///
    /// Default: first-order Euler `x + μ(t,x)·Δt`.
    fn expectation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        x + self.drift_1d(t, x) * dt
    }

    /// Conditional variance over `Δt`. Default: `σ(t,x)²·Δt`.
    fn variance_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        let s = self.diffusion_1d(t, x);
        s * s * dt
    }

    /// Conditional standard deviation over `Δt`.
    fn std_deviation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        self.variance_1d(t, x, dt).sqrt()
    }

    /// Euler increment `μ(t,x)·Δt + σ(t,x)·√Δt·dw`.
    fn increment_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.drift_1d(t, x) * dt + self.diffusion_1d(t, x) * dt.sqrt() * dw
    }

    /// Advance the state by one Euler step: `x + increment_1d(...)`.
    fn evolve_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        x + self.increment_1d(t, x, dt, dw)
    }
}
