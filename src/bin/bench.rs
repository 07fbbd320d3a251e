//! Memsim benchmark runner
//!
//! Runs the randomized traffic harness once per strategy and writes one
//! `benchmark_<strategy>.csv` per run, compatible with the plotting tooling
//! (`step` and `fragmentation_ratio` columns).

use anyhow::Result;
use clap::Parser;
use memsim_rs::{run_benchmark, write_csv, BenchConfig, Strategy};
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "memsim-bench")]
#[command(about = "Fragmentation benchmark across allocation strategies")]
struct Args {
    /// Simulated address-space capacity in units
    #[arg(long, default_value_t = 1024)]
    capacity: u64,

    /// Number of random alloc/free steps per strategy
    #[arg(short, long, default_value_t = 1000)]
    ops: usize,

    /// Maximum allocation request size
    #[arg(short, long, default_value_t = 200)]
    max_alloc: u64,

    /// RNG seed; omit for a random one (the chosen seed is logged)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the CSV output
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = BenchConfig {
        ops: args.ops,
        max_alloc: args.max_alloc,
        seed,
    };

    info!(
        "benchmarking {} ops per strategy (capacity {}, max alloc {}, seed {})",
        args.ops, args.capacity, args.max_alloc, seed
    );

    for strategy in Strategy::ALL {
        let samples = run_benchmark(strategy, args.capacity, &config)?;

        let path = args.out_dir.join(format!("benchmark_{}.csv", strategy));
        let mut file = File::create(&path)?;
        write_csv(&samples, &mut file)?;

        let avg = samples
            .iter()
            .map(|s| s.fragmentation_ratio)
            .sum::<f64>()
            / samples.len().max(1) as f64;
        info!(
            "{}: wrote {} samples to {} (avg fragmentation {:.3})",
            strategy,
            samples.len(),
            path.display(),
            avg
        );
    }
    Ok(())
}
