//! Slot Kit simulator
//!
//! Usage:
//!   sk-sim spin [--config PATH] [--seed N]              - One spin, JSON outcome
//!   sk-sim simulate --spins N [--config PATH] [--seed N] - Session statistics
//!   sk-sim config [--format json|yaml]                   - Print the stock table

mod stats;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sk_engine::{ChaChaRandom, SlotConfig, SlotEngine};

use crate::stats::SessionStats;

#[derive(Parser)]
#[command(name = "sk-sim", about = "Slot Kit spin runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one spin and print the outcome
    Spin {
        /// Table definition (.json, .yaml, .yml); stock 5x3 table if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seed for a reproducible spin
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Run many spins and print session statistics
    Simulate {
        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 10_000)]
        spins: u64,
        /// Table definition (.json, .yaml, .yml); stock 5x3 table if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seed for a reproducible session
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the stock table definition
    Config {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Spin { config, seed } => run_spin(config.as_deref(), seed),
        Commands::Simulate {
            spins,
            config,
            seed,
            json,
        } => run_simulation(config.as_deref(), seed, spins, json),
        Commands::Config { format } => print_config(format),
    }
}

fn load_config(path: Option<&Path>) -> Result<SlotConfig> {
    match path {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("Failed to load table from {}", path.display())),
        None => Ok(SlotConfig::classic_5x3()),
    }
}

fn build_engine(path: Option<&Path>, seed: Option<u64>) -> Result<SlotEngine> {
    let config = load_config(path)?;
    SlotEngine::new(config, ChaChaRandom::new(seed)).context("Invalid table configuration")
}

fn run_spin(path: Option<&Path>, seed: Option<u64>) -> Result<()> {
    let engine = build_engine(path, seed)?;
    let result = engine.spin().context("Spin failed")?;

    let json = serde_json::to_string_pretty(&result).context("Failed to serialize spin result")?;
    println!("{json}");
    Ok(())
}

fn simulate(engine: &SlotEngine, spins: u64) -> Result<SessionStats> {
    let mut stats = SessionStats::default();
    for n in 0..spins {
        let result = engine
            .spin()
            .with_context(|| format!("Spin {} of {} failed", n + 1, spins))?;
        stats.record(&result);
    }
    Ok(stats)
}

fn run_simulation(path: Option<&Path>, seed: Option<u64>, spins: u64, json: bool) -> Result<()> {
    let engine = build_engine(path, seed)?;
    log::info!("Simulating {} spins (seed: {:?})", spins, seed);

    let stats = simulate(&engine, spins)?;

    if json {
        let out = serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?;
        println!("{out}");
    } else {
        print!("{}", stats.summary());
    }
    Ok(())
}

fn print_config(format: Format) -> Result<()> {
    let config = SlotConfig::classic_5x3();
    let out = match format {
        Format::Json => config.to_json(),
        Format::Yaml => config.to_yaml(),
    }
    .context("Failed to serialize table")?;
    println!("{out}");
    Ok(())
}
