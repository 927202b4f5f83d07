//! # hw-instruments
//!
//! Instrument definitions: the European swaption on a fixed-for-floating
//! swap with a regular payment grid.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod swaption;

pub use swaption::{SwapType, SwaptionSpec};
