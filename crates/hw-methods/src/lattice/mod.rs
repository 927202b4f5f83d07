//! Lattice methods for short-rate models.
//!
//! # Overview
//!
//! * [`TimeGrid`] — grid of time points
//! * [`TrinomialTree`] — recombining trinomial tree for additive-noise processes
//! * [`ShortRateTree`] — trinomial tree shifted to reprice a yield curve

pub mod short_rate_tree;
pub mod trinomial_tree;

pub use short_rate_tree::ShortRateTree;
pub use trinomial_tree::TrinomialTree;

use hw_core::{Real, Result, Size, Time};

/// Tolerance used to match a time to a grid point.
const TIME_TOLERANCE: Real = 1e-9;

// ─── TimeGrid ─────────────────────────────────────────────────────────────────

/// A grid of time points `0 = t_0 < t_1 < … < t_n`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Time>,
    dts: Vec<Time>,
}

impl TimeGrid {
    /// Uniform grid from 0 to `end` with `steps` intervals.
    pub fn uniform(end: Time, steps: Size) -> Result<Self> {
        hw_core::ensure!(steps > 0, "a time grid needs at least one step");
        hw_core::ensure!(end.is_finite() && end > 0.0, "grid end must be positive, got {end}");
        let dt = end / steps as Real;
        let times: Vec<Time> = (0..=steps)
            .map(|i| if i == steps { end } else { i as Real * dt })
            .collect();
        let dts = times.windows(2).map(|w| w[1] - w[0]).collect();
        Ok(Self { times, dts })
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> Size {
        self.times.len()
    }

    /// Number of steps.
    pub fn steps(&self) -> Size {
        self.dts.len()
    }

    /// Time at index `i`.
    pub fn time(&self, i: Size) -> Time {
        self.times[i]
    }

    /// Width of step `i`, from `t_i` to `t_{i+1}`.
    pub fn dt(&self, i: Size) -> Time {
        self.dts[i]
    }

    /// Final time.
    pub fn end(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    /// All time points.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Index of the grid point equal to `t`.
    ///
    /// # Errors
    /// [`hw_core::Error::Precondition`] if `t` is not on the grid.
    pub fn index(&self, t: Time) -> Result<Size> {
        let i = self.times.partition_point(|&x| x < t - TIME_TOLERANCE);
        hw_core::ensure!(
            i < self.times.len() && (self.times[i] - t).abs() <= TIME_TOLERANCE,
            "time {t} is not a point of the grid"
        );
        Ok(i)
    }
}
