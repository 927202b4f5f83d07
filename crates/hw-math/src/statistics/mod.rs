//! Sample statistics accumulator.

use hw_core::Real;

/// Incremental statistics accumulator.
///
/// Accumulates samples and reports mean, variance, standard deviation and
/// the standard error of the mean.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    count: usize,
    sum: Real,
    sum_sq: Real,
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean. Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as Real)
        }
    }

    /// Unbiased (Bessel-corrected) variance. Returns `None` for fewer than
    /// 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum / n;
        let s2 = (self.sum_sq / n - m * m).max(0.0);
        Some(s2 * n / (n - 1.0))
    }

    /// Standard deviation. Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean, `σ / √n`.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn basic_statistics() {
        let mut s = Statistics::new();
        s.extend([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.samples(), 5);
        assert_abs_diff_eq!(s.mean().unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std_dev().unwrap(), 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            s.error_estimate().unwrap(),
            (2.5_f64 / 5.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_statistics() {
        let s = Statistics::new();
        assert!(s.mean().is_none());
        assert!(s.variance().is_none());
        assert!(s.error_estimate().is_none());
    }

    #[test]
    fn constant_samples_have_zero_variance() {
        let mut s = Statistics::new();
        s.extend(std::iter::repeat(0.0123).take(1000));
        assert_abs_diff_eq!(s.variance().unwrap(), 0.0, epsilon = 1e-18);
    }
}
