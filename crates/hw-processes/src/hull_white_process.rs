//! Hull-White one-factor short-rate process calibrated to a yield curve.
//!
//! ```text
//! dr = (θ(t) − a·r) dt + σ dW
//! θ(t) = y'(t) + a·y(t) + σ²/(2a)·(1 − e^{−2at})
//! ```
//!
//! `y` is the zero-yield curve, so the drift reproduces the observed curve
//! and the process can be simulated path by path without further fitting.

use crate::stochastic_process::StochasticProcess1D;
use hw_core::{errors::Error, errors::Result, Rate, Real, Time, Volatility};
use hw_termstructures::YieldTermStructure;
use std::sync::Arc;

/// Smallest admissible `|a|`. The affine bond formula and θ(t) divide by `a`.
pub const MIN_MEAN_REVERSION: Real = 1e-8;

/// Hull-White one-factor short-rate process.
#[derive(Debug, Clone)]
pub struct HullWhiteProcess {
    curve: Arc<dyn YieldTermStructure>,
    a: Real,
    sigma: Volatility,
    r0: Rate,
}

impl HullWhiteProcess {
    /// Create a process on `curve` with mean reversion `a`, volatility
    /// `sigma` and initial short rate `r0`.
    ///
    /// # Errors
    /// * [`Error::SingularModel`] if `|a|` is below [`MIN_MEAN_REVERSION`]
    ///   or not finite.
    /// * [`Error::InvalidArgument`] if `a` is negative, `sigma` is not
    ///   positive or `r0` is not finite.
    pub fn new(
        curve: Arc<dyn YieldTermStructure>,
        a: Real,
        sigma: Volatility,
        r0: Rate,
    ) -> Result<Self> {
        if !a.is_finite() || a.abs() < MIN_MEAN_REVERSION {
            return Err(Error::SingularModel { mean_reversion: a });
        }
        if a < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "mean reversion must be positive, got {a}"
            )));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "volatility must be positive, got {sigma}"
            )));
        }
        if !r0.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "initial short rate must be finite, got {r0}"
            )));
        }
        Ok(Self {
            curve,
            a,
            sigma,
            r0,
        })
    }

    /// Mean-reversion speed `a`.
    pub fn a(&self) -> Real {
        self.a
    }

    /// Short-rate volatility `σ`.
    pub fn sigma(&self) -> Volatility {
        self.sigma
    }

    /// The curve the drift is calibrated to.
    pub fn curve(&self) -> &Arc<dyn YieldTermStructure> {
        &self.curve
    }

    /// Calibrated drift term `θ(t)`.
    pub fn theta(&self, t: Time) -> Real {
        let a = self.a;
        self.curve.zero_rate_derivative(t)
            + a * self.curve.zero_rate(t)
            + self.sigma * self.sigma / (2.0 * a) * (1.0 - (-2.0 * a * t).exp())
    }
}

impl StochasticProcess1D for HullWhiteProcess {
    fn x0(&self) -> Real {
        self.r0
    }

    fn drift_1d(&self, t: Time, x: Real) -> Real {
        self.theta(t) - self.a * x
    }

    fn diffusion_1d(&self, _t: Time, _x: Real) -> Real {
        self.sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hw_termstructures::YieldCurve;

    fn flat(rate: Real) -> Arc<dyn YieldTermStructure> {
        Arc::new(YieldCurve::flat(rate).unwrap())
    }

    #[test]
    fn theta_on_a_flat_curve() {
        let (a, sigma, y0) = (0.1, 0.01, 0.04);
        let p = HullWhiteProcess::new(flat(y0), a, sigma, y0).unwrap();
        assert_abs_diff_eq!(p.theta(0.0), a * y0, epsilon = 1e-15);
        let t = 3.0;
        let expected = a * y0 + sigma * sigma / (2.0 * a) * (1.0 - (-2.0 * a * t).exp());
        assert_abs_diff_eq!(p.theta(t), expected, epsilon = 1e-15);
    }

    #[test]
    fn theta_picks_up_the_curve_slope() {
        let curve: Arc<dyn YieldTermStructure> =
            Arc::new(YieldCurve::from_pairs(&[(0.0, 0.02), (10.0, 0.04)]).unwrap());
        let (a, sigma) = (0.05, 0.01);
        let p = HullWhiteProcess::new(curve, a, sigma, 0.02).unwrap();
        let convexity = sigma * sigma / (2.0 * a) * (1.0 - (-2.0 * a * 5.0).exp());
        assert_abs_diff_eq!(p.theta(5.0), 0.002 + a * 0.03 + convexity, epsilon = 1e-15);
    }

    #[test]
    fn drift_and_diffusion() {
        let p = HullWhiteProcess::new(flat(0.05), 0.1, 0.01, 0.03).unwrap();
        assert_eq!(p.x0(), 0.03);
        assert_abs_diff_eq!(p.drift_1d(0.0, 0.03), 0.005 - 0.003, epsilon = 1e-15);
        assert_eq!(p.diffusion_1d(2.0, 0.10), 0.01);
    }

    #[test]
    fn euler_step_matches_the_scheme() {
        let (a, sigma) = (0.01, 0.01);
        let p = HullWhiteProcess::new(flat(0.04), a, sigma, 0.04).unwrap();
        let (t, r, dt, z) = (0.3, 0.041, 0.01, -0.7);
        let expected = r + ((p.theta(t) - a * r) * dt + sigma * dt.sqrt() * z);
        assert_eq!(p.evolve_1d(t, r, dt, z), expected);
    }

    #[test]
    fn rejects_singular_mean_reversion() {
        for a in [0.0, 1e-12, -1e-9, f64::NAN] {
            let err = HullWhiteProcess::new(flat(0.04), a, 0.01, 0.04).unwrap_err();
            assert!(matches!(err, Error::SingularModel { .. }), "a = {a}");
        }
    }

    #[test]
    fn rejects_what_the_model_parameters_reject() {
        for (a, sigma, r0) in [
            (0.1, -0.01, 0.04),
            (0.1, 0.0, 0.04),
            (-0.1, 0.01, 0.04),
            (0.1, 0.01, f64::INFINITY),
        ] {
            assert!(
                matches!(
                    HullWhiteProcess::new(flat(0.04), a, sigma, r0),
                    Err(Error::InvalidArgument(_))
                ),
                "a = {a}, sigma = {sigma}, r0 = {r0}"
            );
        }
    }
}
