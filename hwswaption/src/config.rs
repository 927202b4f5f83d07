//! Run configuration, read from TOML.
//!
//! ```toml
//! [[curve]]
//! maturity = 1.0
//! yield = 0.04
//!
//! [model]
//! mean_reversion = 0.01
//! volatility = 0.01
//! initial_short_rate = 0.04
//!
//! [swaption]
//! maturity = 5.0
//! tenor = 0.5
//! notional = 1.0
//! fixed_rate = 0.04
//!
//! [simulation]
//! paths = 20000
//! steps_per_year = 100
//! horizon = 5.0
//! seed = 42
//!
//! [benchmark]
//! kind = "tree"
//! tree_steps_per_year = 100
//! ```
//!
//! Every section is optional and falls back to [`PricingConfig::default`].

use hw_core::{Error, Real, Result, Size};
use hw_instruments::SwaptionSpec;
use hw_methods::MonteCarloSettings;
use hw_models::ModelParameters;
use hw_pricingengines::{BenchmarkPricer, JamshidianSwaptionEngine, TreeSwaptionEngine};
use hw_termstructures::{CurvePoint, YieldCurve};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slack when checking that the simulation covers the swap.
const HORIZON_TOLERANCE: Real = 1e-12;

/// Failure to load a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The TOML is malformed or has the wrong shape.
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The values parsed but are inconsistent.
    #[error(transparent)]
    Invalid(#[from] Error),
}

/// Which reference pricer to compare the Monte Carlo estimate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkKind {
    /// Hull-White trinomial tree.
    #[default]
    Tree,
    /// Jamshidian's closed form.
    Jamshidian,
    /// No comparison.
    None,
}

/// Benchmark section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Reference pricer.
    pub kind: BenchmarkKind,
    /// Lattice density when `kind = "tree"`.
    pub tree_steps_per_year: Size,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            kind: BenchmarkKind::Tree,
            tree_steps_per_year: 100,
        }
    }
}

impl BenchmarkConfig {
    /// The configured pricer, if any.
    pub fn pricer(&self) -> Result<Option<Box<dyn BenchmarkPricer>>> {
        let pricer: Box<dyn BenchmarkPricer> = match self.kind {
            BenchmarkKind::Tree => Box::new(TreeSwaptionEngine::new(self.tree_steps_per_year)?),
            BenchmarkKind::Jamshidian => Box::new(JamshidianSwaptionEngine::new()),
            BenchmarkKind::None => return Ok(None),
        };
        Ok(Some(pricer))
    }
}

/// Everything a pricing run needs, built once and passed explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Observed zero yields.
    pub curve: Vec<CurvePoint>,
    /// Hull-White parameters.
    pub model: ModelParameters,
    /// The contract.
    pub swaption: SwaptionSpec,
    /// Monte Carlo controls.
    pub simulation: MonteCarloSettings,
    /// Reference pricer.
    pub benchmark: BenchmarkConfig,
}

impl Default for PricingConfig {
    /// The reference run: flat 4 % curve, `a = σ = 0.01`, a 5-year
    /// semi-annual swap struck at 4 %, 20,000 paths at 100 steps a year.
    fn default() -> Self {
        Self {
            curve: [0.5, 1.0, 2.0, 5.0, 10.0]
                .iter()
                .map(|&t| CurvePoint::new(t, 0.04))
                .collect(),
            model: ModelParameters::default(),
            swaption: SwaptionSpec::default(),
            simulation: MonteCarloSettings::default(),
            benchmark: BenchmarkConfig::default(),
        }
    }
}

impl PricingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check every section and the constraints between them.
    ///
    /// # Errors
    /// The first violated constraint: an invalid curve, model, contract or
    /// simulation section, or a horizon that ends before the swap does.
    pub fn validate(&self) -> Result<()> {
        YieldCurve::new(&self.curve)?;
        self.model.validate()?;
        self.swaption.validate()?;
        self.simulation.validate()?;
        if self.simulation.horizon + HORIZON_TOLERANCE < self.swaption.maturity {
            return Err(Error::InvalidArgument(format!(
                "simulation horizon {} ends before swap maturity {}",
                self.simulation.horizon, self.swaption.maturity
            )));
        }
        if self.benchmark.kind == BenchmarkKind::Tree && self.benchmark.tree_steps_per_year == 0 {
            return Err(Error::InvalidArgument(
                "tree benchmark needs at least one step per year".into(),
            ));
        }
        Ok(())
    }
}
