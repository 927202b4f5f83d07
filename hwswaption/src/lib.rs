//! # hwswaption
//!
//! Monte Carlo pricing of European swaptions under the Hull-White one-factor
//! short-rate model, validated against lattice and analytic benchmarks.
//!
//! This crate is a façade over the `hw-*` workspace crates plus the
//! configuration and pipeline used by the `hw-swaption` binary.
//!
//! ```no_run
//! use hwswaption::{price_swaption, PricingConfig};
//!
//! let report = price_swaption(&PricingConfig::default())?;
//! println!("{report}");
//! # Ok::<(), hwswaption::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use hw_core as core;

/// Normal distribution, spline, random numbers, root finding, statistics.
pub use hw_math as math;

/// Yield curves.
pub use hw_termstructures as termstructures;

/// Hull-White and Ornstein-Uhlenbeck processes.
pub use hw_processes as processes;

/// The Hull-White model and its parameters.
pub use hw_models as models;

/// Monte Carlo simulation and trinomial lattices.
pub use hw_methods as methods;

/// The swaption contract.
pub use hw_instruments as instruments;

/// Monte Carlo, lattice and analytic swaption engines.
pub use hw_pricingengines as pricingengines;

/// TOML run configuration.
pub mod config;

/// The end-to-end pricing run.
pub mod pipeline;

pub use config::{BenchmarkConfig, BenchmarkKind, ConfigError, PricingConfig};
pub use pipeline::{price_swaption, BenchmarkReport, PricingReport};
