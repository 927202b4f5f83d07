//! # hw-processes
//!
//! Stochastic processes driving the short rate: the calibrated Hull-White
//! process simulated by the Monte Carlo engine and the zero-level
//! Ornstein-Uhlenbeck process underlying the trinomial lattice.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod hull_white_process;
pub mod ornstein_uhlenbeck_process;
pub mod stochastic_process;

pub use hull_white_process::HullWhiteProcess;
pub use ornstein_uhlenbeck_process::OrnsteinUhlenbeckProcess;
pub use stochastic_process::StochasticProcess1D;
