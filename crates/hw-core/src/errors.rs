//! Error types for hwswaption.
//!
//! Every failure in the pricing pipeline maps to one variant of [`Error`].
//! A pricing run has no partial-result semantics: the first error aborts the
//! run and is propagated to the caller with `?`.

use crate::{Real, Size};
use thiserror::Error;

/// The top-level error type used throughout hwswaption.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by [`fail!`](crate::fail)).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated (raised by [`ensure_post!`](crate::ensure_post)).
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed yield-curve input: too few points, non-increasing
    /// maturities or non-finite values.
    #[error("invalid yield curve: {0}")]
    InvalidCurve(String),

    /// The path count cannot be split into antithetic pairs.
    #[error("invalid ensemble size {paths}: antithetic pairing needs an even, non-zero path count")]
    InvalidEnsembleSize {
        /// The requested number of paths.
        paths: Size,
    },

    /// The mean-reversion speed is too close to zero for the affine
    /// bond formula, which divides by it.
    #[error("singular model: mean reversion a = {mean_reversion:e} is too close to zero")]
    SingularModel {
        /// The offending mean-reversion parameter.
        mean_reversion: Real,
    },

    /// A simulated quantity became NaN or infinite.
    #[error("numeric overflow on path {path} at step {step}: {detail}")]
    NumericOverflow {
        /// Index of the failing path.
        path: Size,
        /// Time-step (or column) index where the failure was detected.
        step: Size,
        /// Description of the offending value and parameters.
        detail: String,
    },
}

/// Shorthand `Result` type used throughout hwswaption.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hw_core::{ensure, errors::Error};
/// fn positive(x: f64) -> hw_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hw_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> hw_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use hw_core::{fail, errors::Error};
/// fn always_err() -> hw_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
