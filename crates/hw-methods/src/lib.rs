//! # hw-methods
//!
//! Numerical methods: the Monte Carlo short-rate simulation (antithetic
//! shocks, Euler paths, per-period discount exponents) and the trinomial
//! lattice used by the benchmark pricer.
//!
//! # Modules
//!
//! * [`monte_carlo`] — shock generation, path simulation, forward-rate aggregation
//! * [`lattice`] — time grids, additive trinomial trees, curve-fitted short-rate trees

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: time grids and trinomial short-rate trees.
pub mod lattice;

/// Monte Carlo simulation of the short rate.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{ShortRateTree, TimeGrid, TrinomialTree};
pub use monte_carlo::{
    ForwardRateAggregator, ForwardRateMatrix, MonteCarloSettings, PathEnsemble, ShockMatrix,
    ShortRateSimulator,
};
