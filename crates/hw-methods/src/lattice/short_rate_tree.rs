//! Trinomial short-rate tree fitted to a yield curve.
//!
//! The tree of a zero-level Ornstein-Uhlenbeck state `x` is shifted layer by
//! layer, `r(i, j) = α_i + x(i, j)`. Each `α_i` is chosen by forward
//! induction of Arrow-Debreu prices `Q` so that the tree reprices the curve's
//! discount factor `P(0, t_{i+1})` exactly:
//!
//! ```text
//! α_i = ( ln Σ_j Q(i,j)·e^{−x(i,j)·Δt_i} − ln P(0, t_{i+1}) ) / Δt_i
//! ```

use super::{TimeGrid, TrinomialTree};
use hw_core::{DiscountFactor, Rate, Real, Result, Size};
use hw_termstructures::YieldTermStructure;

/// A trinomial tree of short rates that reprices a yield curve.
#[derive(Debug, Clone)]
pub struct ShortRateTree {
    tree: TrinomialTree,
    alphas: Vec<Real>,
}

impl ShortRateTree {
    /// Fit the layer shifts of `tree` to `curve`.
    pub fn new(tree: TrinomialTree, curve: &dyn YieldTermStructure) -> Result<Self> {
        let n = tree.steps();
        let mut alphas = Vec::with_capacity(n);
        let mut q = vec![1.0];

        for i in 0..n {
            let grid = tree.time_grid();
            let dt = grid.dt(i);
            let target = curve.discount(grid.time(i + 1));
            hw_core::ensure!(target > 0.0, "non-positive discount factor at t = {}", grid.time(i + 1));

            let sum: Real = q
                .iter()
                .enumerate()
                .map(|(j, qj)| qj * (-tree.underlying(i, j) * dt).exp())
                .sum();
            let alpha = (sum.ln() - target.ln()) / dt;

            let mut next = vec![0.0; tree.size(i + 1)];
            for (j, qj) in q.iter().enumerate() {
                let df = (-(alpha + tree.underlying(i, j)) * dt).exp();
                for b in 0..3 {
                    next[tree.descendant(i, j, b)] += qj * tree.probability(i, j, b) * df;
                }
            }
            alphas.push(alpha);
            q = next;
        }

        hw_core::ensure_post!(
            alphas.iter().all(|a| a.is_finite()),
            "short-rate tree shifts are not finite"
        );
        Ok(Self { tree, alphas })
    }

    /// The time grid.
    pub fn time_grid(&self) -> &TimeGrid {
        self.tree.time_grid()
    }

    /// Number of nodes on layer `i`.
    pub fn size(&self, i: Size) -> Size {
        self.tree.size(i)
    }

    /// Short rate at node `(i, index)`, `i < steps`.
    pub fn short_rate(&self, i: Size, index: Size) -> Rate {
        self.alphas[i] + self.tree.underlying(i, index)
    }

    /// One-step discount factor from node `(i, index)`.
    pub fn discount(&self, i: Size, index: Size) -> DiscountFactor {
        (-self.short_rate(i, index) * self.time_grid().dt(i)).exp()
    }

    /// Discounted expectation of `values` (on layer `i+1`) at every node of
    /// layer `i`.
    pub fn rollback_step(&self, i: Size, values: &[Real]) -> Vec<Real> {
        (0..self.size(i))
            .map(|j| {
                let expected: Real = (0..3)
                    .map(|b| self.tree.probability(i, j, b) * values[self.tree.descendant(i, j, b)])
                    .sum();
                self.discount(i, j) * expected
            })
            .collect()
    }

    /// Roll `values` back from layer `from` to layer `to`.
    pub fn rollback(&self, values: Vec<Real>, from: Size, to: Size) -> Vec<Real> {
        (to..from)
            .rev()
            .fold(values, |v, i| self.rollback_step(i, &v))
    }
}
