//! Recombining trinomial tree for processes with additive noise.
//!
//! Layer `i+1` has spacing `dx = √(3·Var)` where `Var` is the conditional
//! variance over step `i`. Every node branches to the three nodes around its
//! conditional mean; the branch probabilities match the first two moments.
//! The variance must not depend on the state, which holds for the
//! Ornstein-Uhlenbeck process behind Hull-White.

use hw_core::{Real, Result, Size};
use hw_processes::StochasticProcess1D;

use super::TimeGrid;

/// Branching data for one time step.
#[derive(Debug, Clone)]
struct Branching {
    /// Middle descendant `k` (absolute offset on the next layer) of each node.
    k: Vec<i64>,
    /// Down, middle and up probabilities of each node.
    probs: [Vec<Real>; 3],
    /// Offset range of the next layer.
    j_min: i64,
    j_max: i64,
}

impl Branching {
    fn new() -> Self {
        Self {
            k: Vec::new(),
            probs: [Vec::new(), Vec::new(), Vec::new()],
            j_min: i64::MAX,
            j_max: i64::MIN,
        }
    }

    fn add(&mut self, k: i64, p_down: Real, p_mid: Real, p_up: Real) {
        self.k.push(k);
        self.probs[0].push(p_down);
        self.probs[1].push(p_mid);
        self.probs[2].push(p_up);
        self.j_min = self.j_min.min(k - 1);
        self.j_max = self.j_max.max(k + 1);
    }

    fn size(&self) -> Size {
        (self.j_max - self.j_min + 1) as Size
    }

    fn descendant(&self, index: Size, branch: Size) -> Size {
        (self.k[index] - self.j_min - 1 + branch as i64) as Size
    }

    fn probability(&self, index: Size, branch: Size) -> Real {
        self.probs[branch][index]
    }
}

/// A recombining trinomial tree on a [`TimeGrid`].
///
/// Node `(i, index)` holds `x0 + (j_min(i) + index)·dx(i)`.
#[derive(Debug, Clone)]
pub struct TrinomialTree {
    x0: Real,
    dx: Vec<Real>,
    branchings: Vec<Branching>,
    time_grid: TimeGrid,
}

impl TrinomialTree {
    /// Build the tree for `process` on `grid`.
    ///
    /// # Errors
    /// [`hw_core::Error::Precondition`] if a step has zero variance.
    pub fn new(process: &dyn StochasticProcess1D, grid: &TimeGrid) -> Result<Self> {
        let x0 = process.x0();
        let n = grid.steps();
        let sqrt3 = 3.0_f64.sqrt();

        let mut dx = Vec::with_capacity(n + 1);
        dx.push(0.0);
        let mut branchings: Vec<Branching> = Vec::with_capacity(n);
        let (mut j_min, mut j_max) = (0i64, 0i64);

        for i in 0..n {
            let t = grid.time(i);
            let dt = grid.dt(i);
            let v2 = process.variance_1d(t, x0, dt);
            hw_core::ensure!(v2 > 0.0, "zero variance over step {i}");
            let v = v2.sqrt();
            let dx_next = v * sqrt3;

            let mut branching = Branching::new();
            for j in j_min..=j_max {
                let x = x0 + j as Real * dx[i];
                let m = process.expectation_1d(t, x, dt);
                let k = ((m - x0) / dx_next + 0.5).floor() as i64;

                let e = m - (x0 + k as Real * dx_next);
                let e2 = e * e;
                let e3 = e * sqrt3;

                let p_down = (1.0 + e2 / v2 - e3 / v) / 6.0;
                let p_mid = (2.0 - e2 / v2) / 3.0;
                let p_up = (1.0 + e2 / v2 + e3 / v) / 6.0;
                branching.add(k, p_down, p_mid, p_up);
            }

            j_min = branching.j_min;
            j_max = branching.j_max;
            dx.push(dx_next);
            branchings.push(branching);
        }

        Ok(Self {
            x0,
            dx,
            branchings,
            time_grid: grid.clone(),
        })
    }

    /// The time grid.
    pub fn time_grid(&self) -> &TimeGrid {
        &self.time_grid
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.time_grid.steps()
    }

    /// Number of nodes at layer `i`.
    pub fn size(&self, i: Size) -> Size {
        if i == 0 {
            1
        } else {
            self.branchings[i - 1].size()
        }
    }

    /// State value at node `(i, index)`.
    pub fn underlying(&self, i: Size, index: Size) -> Real {
        if i == 0 {
            self.x0
        } else {
            let j_min = self.branchings[i - 1].j_min;
            self.x0 + (j_min + index as i64) as Real * self.dx[i]
        }
    }

    /// Node index on layer `i+1` reached from `(i, index)` by `branch`
    /// (0 = down, 1 = middle, 2 = up).
    pub fn descendant(&self, i: Size, index: Size, branch: Size) -> Size {
        self.branchings[i].descendant(index, branch)
    }

    /// Probability of `branch` from node `(i, index)`.
    pub fn probability(&self, i: Size, index: Size, branch: Size) -> Real {
        self.branchings[i].probability(index, branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hw_processes::OrnsteinUhlenbeckProcess;

    fn tree(steps: Size) -> (OrnsteinUhlenbeckProcess, TrinomialTree) {
        let p = OrnsteinUhlenbeckProcess::new(0.1, 0.01).unwrap();
        let grid = TimeGrid::uniform(5.0, steps).unwrap();
        let t = TrinomialTree::new(&p, &grid).unwrap();
        (p, t)
    }

    #[test]
    fn layers_grow_then_stay_bounded() {
        let (_, t) = tree(100);
        assert_eq!(t.size(0), 1);
        assert_eq!(t.size(1), 3);
        assert_eq!(t.size(2), 5);

        // strong mean reversion pulls outer nodes back inside
        let p = OrnsteinUhlenbeckProcess::new(1.0, 0.01).unwrap();
        let grid = TimeGrid::uniform(5.0, 100).unwrap();
        let t = TrinomialTree::new(&p, &grid).unwrap();
        assert_eq!(t.size(100), t.size(99));
        assert!(t.size(100) < 30);
    }

    #[test]
    fn probabilities_are_valid() {
        let (_, t) = tree(50);
        for i in 0..t.steps() {
            for j in 0..t.size(i) {
                let ps: Vec<f64> = (0..3).map(|b| t.probability(i, j, b)).collect();
                assert_abs_diff_eq!(ps.iter().sum::<f64>(), 1.0, epsilon = 1e-14);
                assert!(ps.iter().all(|&p| (0.0..=1.0).contains(&p)), "{ps:?}");
                for b in 0..3 {
                    assert!(t.descendant(i, j, b) < t.size(i + 1));
                }
            }
        }
    }

    #[test]
    fn branching_matches_conditional_moments() {
        let (p, t) = tree(40);
        let dt = t.time_grid().dt(0);
        for i in [5, 20, 39] {
            for j in 0..t.size(i) {
                let x = t.underlying(i, j);
                let (mut mean, mut second) = (0.0, 0.0);
                for b in 0..3 {
                    let y = t.underlying(i + 1, t.descendant(i, j, b));
                    mean += t.probability(i, j, b) * y;
                    second += t.probability(i, j, b) * y * y;
                }
                let m = p.expectation_1d(0.0, x, dt);
                assert_abs_diff_eq!(mean, m, epsilon = 1e-14);
                assert_abs_diff_eq!(second - mean * mean, p.variance_1d(0.0, x, dt), epsilon = 1e-15);
            }
        }
    }
}
