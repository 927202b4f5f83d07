//! Reference pricers used to validate the Monte Carlo estimate.

use hw_core::{Price, Rate, Real, Result, Time, Volatility};

/// An independent pricer for the European receiver swaption.
///
/// Prices are per unit notional on a flat curve at `initial_rate`. The
/// instrument is the one the Monte Carlo engine prices: exercise at `tenor`,
/// fixed payments every `tenor` up to `maturity`.
pub trait BenchmarkPricer: std::fmt::Debug + Send + Sync {
    /// Fair value of the swaption.
    fn price(
        &self,
        maturity: Time,
        tenor: Time,
        mean_reversion: Real,
        volatility: Volatility,
        fixed_rate: Rate,
        initial_rate: Rate,
    ) -> Result<Price>;

    /// Short name for reports.
    fn name(&self) -> &'static str;
}

/// Difference between an estimate and a benchmark value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkComparison {
    /// Value under test.
    pub estimate: Price,
    /// Reference value.
    pub benchmark: Price,
    /// `estimate − benchmark`.
    pub absolute: Real,
    /// `absolute / benchmark`; `None` when the benchmark is zero.
    pub relative: Option<Real>,
}

impl BenchmarkComparison {
    /// Compare `estimate` against `benchmark`.
    pub fn new(estimate: Price, benchmark: Price) -> Self {
        let absolute = estimate - benchmark;
        Self {
            estimate,
            benchmark,
            absolute,
            relative: (benchmark != 0.0).then(|| absolute / benchmark),
        }
    }

    /// Absolute difference measured in standard errors of the estimate.
    pub fn standard_errors(&self, std_error: Real) -> Option<Real> {
        (std_error > 0.0).then(|| self.absolute.abs() / std_error)
    }
}
