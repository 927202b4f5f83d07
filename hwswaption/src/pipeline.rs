//! One pricing run: curve → model → Monte Carlo estimate → benchmark.

use crate::config::PricingConfig;
use hw_core::{Real, Result};
use hw_models::HullWhite;
use hw_pricingengines::{BenchmarkComparison, McSwaptionResult, MonteCarloSwaptionEngine};
use hw_termstructures::{YieldCurve, YieldTermStructure};
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

/// Benchmark value and its distance from the estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkReport {
    /// Name of the reference pricer.
    pub name: &'static str,
    /// Estimate against benchmark, both scaled by the notional.
    pub comparison: BenchmarkComparison,
}

/// Result of [`price_swaption`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingReport {
    /// Monte Carlo estimate and its standard error.
    pub monte_carlo: McSwaptionResult,
    /// Contract notional the values are scaled by.
    pub notional: Real,
    /// Comparison with the configured benchmark, if any.
    pub benchmark: Option<BenchmarkReport>,
}

impl PricingReport {
    /// Distance from the benchmark in standard errors.
    pub fn standard_errors_from_benchmark(&self) -> Option<Real> {
        self.benchmark
            .and_then(|b| b.comparison.standard_errors(self.monte_carlo.std_error))
    }
}

impl fmt::Display for PricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mc = &self.monte_carlo;
        writeln!(f, "{:<22}{:>14.8}", "monte carlo estimate", mc.estimate)?;
        writeln!(f, "{:<22}{:>14.8}", "standard error", mc.std_error)?;
        writeln!(f, "{:<22}{:>14}", "paths", mc.paths)?;
        write!(f, "{:<22}{:>14.4}", "exercise time", mc.exercise_time)?;
        if let Some(b) = &self.benchmark {
            let c = &b.comparison;
            writeln!(f)?;
            writeln!(f, "{:<22}{:>14.8}", b.name, c.benchmark)?;
            write!(f, "{:<22}{:>14.8}", "absolute difference", c.absolute)?;
            if let Some(rel) = c.relative {
                write!(f, "\n{:<22}{:>13.4}%", "relative difference", 100.0 * rel)?;
            }
            if let Some(n) = self.standard_errors_from_benchmark() {
                write!(f, "\n{:<22}{:>14.2}", "standard errors", n)?;
            }
        }
        Ok(())
    }
}

/// Price the configured swaption by Monte Carlo and compare it with the
/// configured benchmark.
///
/// The benchmark is priced per unit notional on a flat curve at the model's
/// initial short rate and then scaled by the notional.
#[instrument(skip_all, fields(paths = config.simulation.paths, seed = config.simulation.seed))]
pub fn price_swaption(config: &PricingConfig) -> Result<PricingReport> {
    config.validate()?;

    let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::new(&config.curve)?);
    let model = HullWhite::new(curve, config.model)?;
    let spec = config.swaption;
    let monte_carlo = MonteCarloSwaptionEngine::new(&model, spec, config.simulation)?.calculate()?;

    let benchmark = match config.benchmark.pricer()? {
        Some(pricer) => {
            let params = &config.model;
            let unit = pricer.price(
                spec.maturity,
                spec.tenor,
                params.mean_reversion,
                params.volatility,
                spec.fixed_rate,
                params.initial_short_rate,
            )?;
            let comparison = BenchmarkComparison::new(monte_carlo.estimate, unit * spec.notional);
            info!(
                benchmark = pricer.name(),
                value = comparison.benchmark,
                absolute = comparison.absolute,
                "benchmark comparison"
            );
            Some(BenchmarkReport {
                name: pricer.name(),
                comparison,
            })
        }
        None => None,
    };

    Ok(PricingReport {
        monte_carlo,
        notional: spec.notional,
        benchmark,
    })
}
