//! `hw-swaption` — price a European swaption under Hull-White by Monte Carlo.
//!
//! ```bash
//! # reference run with the built-in defaults
//! hw-swaption
//!
//! # from a file, with overrides
//! hw-swaption --config hw-swaption.toml --paths 2000 --benchmark jamshidian
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use hwswaption::{price_swaption, BenchmarkKind, PricingConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Hull-White Monte Carlo swaption pricer
#[derive(Parser)]
#[command(name = "hw-swaption")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of Monte Carlo paths (even)
    #[arg(long)]
    paths: Option<usize>,

    /// Seed of the shock generator
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation steps per year
    #[arg(long)]
    steps_per_year: Option<usize>,

    /// Reference pricer
    #[arg(long, value_enum)]
    benchmark: Option<BenchmarkKind>,

    /// Print the effective configuration before pricing
    #[arg(long)]
    show_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut PricingConfig) {
        if let Some(paths) = self.paths {
            config.simulation.paths = paths;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(spy) = self.steps_per_year {
            config.simulation.steps_per_year = spy;
        }
        if let Some(kind) = self.benchmark {
            config.benchmark.kind = kind;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => PricingConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PricingConfig::default(),
    };
    cli.apply(&mut config);

    if cli.show_config {
        println!("{}", config.to_toml_string().context("rendering configuration")?);
    }

    let report = price_swaption(&config).context("pricing failed")?;
    println!("{report}");
    Ok(())
}
