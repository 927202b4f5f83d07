//! 1D interpolation trait and implementations.

pub mod cubic;

pub use cubic::NaturalCubicSpline;

use hw_core::Real;

/// A 1D interpolation function `f: R → R` defined by a set of known points,
/// together with its first derivative.
pub trait Interpolation1D: std::fmt::Debug + Send + Sync {
    /// Evaluate the interpolation at `x`.
    fn operator(&self, x: Real) -> Real;

    /// Evaluate the first derivative `f'(x)`.
    fn derivative(&self, x: Real) -> Real;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;
}

/// Binary search: find `i` such that `xs[i] <= x < xs[i+1]`, clamped to the
/// first and last interval.
pub(crate) fn locate(xs: &[Real], x: Real) -> usize {
    let n = xs.len();
    if x <= xs[0] {
        return 0;
    }
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
