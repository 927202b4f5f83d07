//! 1D root finding.
//!
//! Used to locate the critical short rate at which a coupon bond is worth
//! par, a strictly monotone function of the rate.

use hw_core::{
    errors::{Error, Result},
    Real,
};

const MAX_EVALUATIONS: u32 = 100;
const DEFAULT_ACCURACY: Real = 1.0e-11;

/// A point `(x, f(x))`.
#[derive(Debug, Clone, Copy)]
struct Sample {
    x: Real,
    fx: Real,
}

/// Brent's method on the bracket `[x_min, x_max]`.
///
/// Each iteration tries inverse quadratic interpolation (or a secant step
/// when only two distinct points are known) and falls back to bisection
/// whenever the interpolated step would not shrink the bracket fast enough.
/// A non-positive `accuracy` selects `1e-11`.
///
/// # Errors
/// * [`Error::Precondition`] if `f` is not finite at the ends or has the same
///   sign at both.
/// * [`Error::Runtime`] if no root is found within the evaluation budget.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let accuracy = if accuracy > 0.0 { accuracy } else { DEFAULT_ACCURACY };

    let mut prev = Sample { x: x_min, fx: f(x_min) };
    let mut best = Sample { x: x_max, fx: f(x_max) };
    if !(prev.fx.is_finite() && best.fx.is_finite()) {
        return Err(Error::Precondition(format!(
            "Brent: f is not finite at the bracket ends ({}, {})",
            prev.fx, best.fx
        )));
    }
    if prev.fx == 0.0 {
        return Ok(prev.x);
    }
    if best.fx == 0.0 {
        return Ok(best.x);
    }
    if prev.fx.signum() == best.fx.signum() {
        return Err(Error::Precondition(format!(
            "Brent: f({x_min}) and f({x_max}) must have opposite signs"
        )));
    }

    // `contra` always holds the end of the bracket opposite to `best`.
    let mut contra = prev;
    let mut step = best.x - prev.x;
    let mut last_step = step;

    for _ in 0..MAX_EVALUATIONS {
        if best.fx.signum() == contra.fx.signum() {
            contra = prev;
            step = best.x - prev.x;
            last_step = step;
        }
        if contra.fx.abs() < best.fx.abs() {
            prev = best;
            best = contra;
            contra = prev;
        }

        let tol = 2.0 * Real::EPSILON * best.x.abs() + 0.5 * accuracy;
        let half = 0.5 * (contra.x - best.x);
        if half.abs() <= tol || best.fx == 0.0 {
            return Ok(best.x);
        }

        let interpolate = last_step.abs() >= tol && prev.fx.abs() > best.fx.abs();
        let proposal = interpolate.then(|| interpolation_step(prev, best, contra, half));
        match proposal {
            Some((p, q))
                if 2.0 * p < 3.0 * half * q - (tol * q).abs() && 2.0 * p < (last_step * q).abs() =>
            {
                last_step = step;
                step = p / q;
            }
            _ => {
                step = half;
                last_step = step;
            }
        }

        prev = best;
        best.x += if step.abs() > tol {
            step
        } else {
            tol.copysign(half)
        };
        best.fx = f(best.x);
    }

    Err(Error::Runtime(format!(
        "Brent: no root within {MAX_EVALUATIONS} evaluations"
    )))
}

/// Numerator and (positive-oriented) denominator of the interpolated step.
fn interpolation_step(prev: Sample, best: Sample, contra: Sample, half: Real) -> (Real, Real) {
    let s = best.fx / prev.fx;
    let (p, q) = if prev.x == contra.x {
        (2.0 * half * s, 1.0 - s)
    } else {
        let q = prev.fx / contra.fx;
        let r = best.fx / contra.fx;
        (
            s * (2.0 * half * q * (q - r) - (best.x - prev.x) * (r - 1.0)),
            (q - 1.0) * (r - 1.0) * (s - 1.0),
        )
    };
    if p > 0.0 {
        (p, -q)
    } else {
        (-p, q)
    }
}
