//! `YieldCurve` — a zero-yield curve through a small set of
//! `(maturity, yield)` points.
//!
//! The yields are interpolated with a natural cubic spline, so the curve is
//! continuously differentiable and its derivative is available in closed
//! form. Beyond the first and last knot the curve continues linearly with the
//! boundary slope. A flat input produces a curve whose derivative is exactly
//! zero everywhere.

use crate::yield_term_structure::YieldTermStructure;
use hw_core::{
    errors::{Error, Result},
    Rate, Real, Time,
};
use hw_math::{Interpolation1D, NaturalCubicSpline};
use serde::{Deserialize, Serialize};

/// One observed point of the yield curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: Time,
    /// Continuously-compounded zero yield for that maturity.
    #[serde(rename = "yield")]
    pub zero_yield: Rate,
}

impl CurvePoint {
    /// Create a curve point.
    pub fn new(maturity: Time, zero_yield: Rate) -> Self {
        Self {
            maturity,
            zero_yield,
        }
    }
}

/// A spline-interpolated zero-yield curve. Immutable once built.
#[derive(Debug, Clone)]
pub struct YieldCurve {
    points: Vec<CurvePoint>,
    spline: NaturalCubicSpline,
}

impl YieldCurve {
    /// Build a curve from observed points.
    ///
    /// # Errors
    /// [`Error::InvalidCurve`] if fewer than two points are given, if the
    /// maturities are negative or not strictly increasing, or if any value
    /// is not finite.
    pub fn new(points: &[CurvePoint]) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidCurve(format!(
                "need at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(p) = points
            .iter()
            .find(|p| !p.maturity.is_finite() || !p.zero_yield.is_finite())
        {
            return Err(Error::InvalidCurve(format!(
                "non-finite point (maturity {}, yield {})",
                p.maturity, p.zero_yield
            )));
        }
        if points[0].maturity < 0.0 {
            return Err(Error::InvalidCurve(format!(
                "negative maturity {}",
                points[0].maturity
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[1].maturity <= w[0].maturity) {
            return Err(Error::InvalidCurve(format!(
                "maturities must be strictly increasing, got {} followed by {}",
                w[0].maturity, w[1].maturity
            )));
        }

        let xs: Vec<Real> = points.iter().map(|p| p.maturity).collect();
        let ys: Vec<Real> = points.iter().map(|p| p.zero_yield).collect();
        let spline = NaturalCubicSpline::new(&xs, &ys)?;
        Ok(Self {
            points: points.to_vec(),
            spline,
        })
    }

    /// Build a curve from `(maturity, yield)` pairs.
    pub fn from_pairs(pairs: &[(Time, Rate)]) -> Result<Self> {
        let points: Vec<CurvePoint> = pairs.iter().map(|&(t, y)| CurvePoint::new(t, y)).collect();
        Self::new(&points)
    }

    /// A flat curve at `rate` for every maturity.
    pub fn flat(rate: Rate) -> Result<Self> {
        Self::from_pairs(&[(0.0, rate), (1.0, rate)])
    }

    /// Interpolated zero yield `y(t)`.
    pub fn value(&self, t: Time) -> Rate {
        self.spline.operator(t)
    }

    /// Derivative `y'(t)`.
    pub fn derivative(&self, t: Time) -> Real {
        self.spline.derivative(t)
    }

    /// The observed points the curve was built from.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }
}

impl YieldTermStructure for YieldCurve {
    fn zero_rate(&self, t: Time) -> Rate {
        self.value(t)
    }

    fn zero_rate_derivative(&self, t: Time) -> Real {
        self.derivative(t)
    }
}
