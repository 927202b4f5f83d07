//! # hw-pricingengines
//!
//! Swaption pricing under the Hull-White model.
//!
//! ## Engines
//!
//! - [`SwapValuator`] — receiver swap value per path and exercise date
//! - [`SwaptionMonteCarloEstimator`] — discounted European payoff averaged over paths
//! - [`MonteCarloSwaptionEngine`] — the full simulation pipeline for one swaption
//! - [`TreeSwaptionEngine`] — trinomial-lattice benchmark
//! - [`JamshidianSwaptionEngine`] — analytic benchmark by Jamshidian's decomposition
//! - [`BenchmarkComparison`] — absolute and relative difference to a benchmark

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod benchmark;
pub mod jamshidian_swaption_engine;
pub mod mc_swaption_engine;
pub mod swap_valuator;
pub mod tree_swaption_engine;

pub use benchmark::{BenchmarkComparison, BenchmarkPricer};
pub use jamshidian_swaption_engine::JamshidianSwaptionEngine;
pub use mc_swaption_engine::{McSwaptionResult, MonteCarloSwaptionEngine, SwaptionMonteCarloEstimator};
pub use swap_valuator::{SwapValuator, SwapValueMatrix};
pub use tree_swaption_engine::TreeSwaptionEngine;
