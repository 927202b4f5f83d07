//! Natural cubic spline interpolation with analytic first derivative.
//!
//! The spline is C² inside the knot range and has zero curvature at both
//! ends. Once the knot slopes are known every interval is evaluated as the
//! cubic Hermite polynomial
//!
//!   `f(x) = y_i + dx*(a_i + dx*(b_i + dx*c_i))`,  `dx = x - x_i`.
//!
//! Outside `[x_0, x_{n-1}]` the spline continues linearly with the boundary
//! slope, so value and derivative stay continuous everywhere.

use hw_core::{errors::Result, Real};

use super::{locate, Interpolation1D};

/// Convert slopes (`ts`) + data (`xs`, `ys`) into polynomial coefficients.
fn compute_coefficients(
    xs: &[Real],
    ys: &[Real],
    ts: &[Real],
) -> (Vec<Real>, Vec<Real>, Vec<Real>) {
    let n = xs.len();
    let mut a = Vec::with_capacity(n - 1);
    let mut b = Vec::with_capacity(n - 1);
    let mut c = Vec::with_capacity(n - 1);

    for i in 0..n - 1 {
        let dx = xs[i + 1] - xs[i];
        let s = (ys[i + 1] - ys[i]) / dx;
        a.push(ts[i]);
        b.push((3.0 * s - ts[i + 1] - 2.0 * ts[i]) / dx);
        c.push((ts[i + 1] + ts[i] - 2.0 * s) / (dx * dx));
    }

    (a, b, c)
}

/// Second derivatives of the natural spline (`M_0 = M_{n-1} = 0`), obtained
/// with the Thomas algorithm on the tridiagonal continuity system
///
///   `h_{i-1} M_{i-1} + 2(h_{i-1}+h_i) M_i + h_i M_{i+1} = 6(s_i − s_{i-1})`.
fn natural_second_derivatives(h: &[Real], s: &[Real]) -> Vec<Real> {
    let n = h.len() + 1;
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    let interior = n - 2;
    let mut diag = Vec::with_capacity(interior);
    let mut rhs = Vec::with_capacity(interior);
    for i in 1..n - 1 {
        diag.push(2.0 * (h[i - 1] + h[i]));
        rhs.push(6.0 * (s[i] - s[i - 1]));
    }

    // Forward elimination: sub-diagonal h[k], super-diagonal h[k+1].
    for k in 1..interior {
        let w = h[k] / diag[k - 1];
        diag[k] -= w * h[k];
        rhs[k] -= w * rhs[k - 1];
    }

    // Back substitution.
    m[interior] = rhs[interior - 1] / diag[interior - 1];
    for k in (0..interior - 1).rev() {
        m[k + 1] = (rhs[k] - h[k + 1] * m[k + 2]) / diag[k];
    }
    m
}

/// Natural cubic spline.
///
/// Requires at least 2 strictly increasing abscissae; with exactly two
/// points it degenerates to the straight line through them.
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    xs: Vec<Real>,
    ys: Vec<Real>,
    /// Knot slopes `f'(x_i)`.
    ts: Vec<Real>,
    a: Vec<Real>,
    b: Vec<Real>,
    c: Vec<Real>,
}

impl NaturalCubicSpline {
    /// Build a natural cubic spline through `(xs[i], ys[i])`.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        let n = xs.len();
        hw_core::ensure!(n >= 2, "natural cubic spline requires at least 2 points, got {n}");
        hw_core::ensure!(xs.len() == ys.len(), "xs and ys must have the same length");
        hw_core::ensure!(
            xs.windows(2).all(|w| w[1] > w[0]),
            "abscissae must be strictly increasing"
        );

        let xs = xs.to_vec();
        let ys = ys.to_vec();

        let mut h = Vec::with_capacity(n - 1);
        let mut s = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            h.push(xs[i + 1] - xs[i]);
            s.push((ys[i + 1] - ys[i]) / h[i]);
        }

        let m = natural_second_derivatives(&h, &s);

        let mut ts = Vec::with_capacity(n);
        for i in 0..n - 1 {
            ts.push(s[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0);
        }
        ts.push(s[n - 2] + h[n - 2] * (m[n - 2] + 2.0 * m[n - 1]) / 6.0);

        let (a, b, c) = compute_coefficients(&xs, &ys, &ts);
        Ok(Self { xs, ys, ts, a, b, c })
    }
}

impl Interpolation1D for NaturalCubicSpline {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn operator(&self, x: Real) -> Real {
        let last = self.xs.len() - 1;
        if x < self.xs[0] {
            return self.ys[0] + self.ts[0] * (x - self.xs[0]);
        }
        if x > self.xs[last] {
            return self.ys[last] + self.ts[last] * (x - self.xs[last]);
        }
        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        self.ys[i] + dx * (self.a[i] + dx * (self.b[i] + dx * self.c[i]))
    }

    fn derivative(&self, x: Real) -> Real {
        let last = self.xs.len() - 1;
        if x < self.xs[0] {
            return self.ts[0];
        }
        if x > self.xs[last] {
            return self.ts[last];
        }
        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        self.a[i] + dx * (2.0 * self.b[i] + 3.0 * dx * self.c[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn spline_passes_through_nodes() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 0.5, 2.0, 1.5];
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        assert_eq!((f.x_min(), f.x_max()), (0.0, 4.0));
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let v = f.operator(x);
            assert!((v - y).abs() < 1e-12, "at x={x}: expected {y}, got {v}");
        }
    }

    #[test]
    fn spline_reproduces_linear_data() {
        let xs = [0.0, 0.5, 2.0, 3.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|&x| 0.01 + 0.002 * x).collect();
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        for i in 0..=70 {
            let x = 0.1 * i as f64;
            assert_abs_diff_eq!(f.operator(x), 0.01 + 0.002 * x, epsilon = 1e-14);
            assert_abs_diff_eq!(f.derivative(x), 0.002, epsilon = 1e-13);
        }
    }

    #[test]
    fn flat_data_has_exactly_zero_derivative() {
        let xs = [0.25, 1.0, 2.0, 5.0, 10.0, 30.0];
        let ys = [0.04; 6];
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        for i in 0..=300 {
            let x = 0.1 * i as f64;
            assert_eq!(f.operator(x), 0.04);
            assert_eq!(f.derivative(x), 0.0);
        }
    }

    #[test]
    fn two_points_give_a_straight_line() {
        let f = NaturalCubicSpline::new(&[1.0, 3.0], &[0.02, 0.03]).unwrap();
        assert_abs_diff_eq!(f.operator(2.0), 0.025, epsilon = 1e-15);
        assert_abs_diff_eq!(f.derivative(2.0), 0.005, epsilon = 1e-15);
        assert_abs_diff_eq!(f.operator(5.0), 0.04, epsilon = 1e-15);
    }

    #[test]
    fn natural_end_conditions_give_c1_extrapolation() {
        let xs = [0.0, 1.0, 2.0, 4.0];
        let ys = [0.01, 0.02, 0.025, 0.03];
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        let eps = 1e-7;
        for &edge in &[0.0, 4.0] {
            let inside = f.derivative(edge + if edge == 0.0 { eps } else { -eps });
            let outside = f.derivative(edge + if edge == 0.0 { -eps } else { eps });
            assert_abs_diff_eq!(inside, outside, epsilon = 1e-8);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let xs = [0.5, 1.0, 2.0, 3.0, 5.0, 10.0];
        let ys = [0.030, 0.032, 0.035, 0.037, 0.040, 0.042];
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        let h = 1e-6;
        for i in 1..95 {
            let x = 0.5 + 0.1 * i as f64;
            let fd = (f.operator(x + h) - f.operator(x - h)) / (2.0 * h);
            assert_abs_diff_eq!(f.derivative(x), fd, epsilon = 1e-7);
        }
    }

    #[test]
    fn rejects_non_increasing_abscissae() {
        assert!(NaturalCubicSpline::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]).is_err());
        assert!(NaturalCubicSpline::new(&[0.0], &[0.0]).is_err());
    }

    proptest! {
        #[test]
        fn spline_interpolates_random_knots(
            ys in proptest::collection::vec(-0.05f64..0.10, 2..12)
        ) {
            let xs: Vec<f64> = (0..ys.len()).map(|i| 0.5 * i as f64 + 0.25).collect();
            let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
            for (&x, &y) in xs.iter().zip(ys.iter()) {
                prop_assert!((f.operator(x) - y).abs() < 1e-12);
            }
        }
    }
}
