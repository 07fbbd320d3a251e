//! Benchmark harness: randomized alloc/free traffic per strategy
//!
//! The harness is a consumer of the engine, not part of it: it drives public
//! `Arena` operations and records the fragmentation report after every step.
//! Each run gets a fresh arena so stale segments from a prior strategy can
//! never leak into buddy geometry.

use crate::arena::Arena;
use crate::error::Result;
use crate::strategy::Strategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Traffic shape for one benchmark run
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    /// Number of simulation steps
    pub ops: usize,
    /// Allocation sizes are drawn uniformly from `1..=max_alloc`
    pub max_alloc: u64,
    /// RNG seed; identical seeds replay identical traffic
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            ops: 1000,
            max_alloc: 200,
            seed: 0,
        }
    }
}

/// Fragmentation observed after one simulation step
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sample {
    pub step: usize,
    pub total_free: u64,
    pub largest_free: u64,
    pub fragment_count: usize,
    pub fragmentation_ratio: f64,
}

/// Drive `config.ops` random alloc/free steps against a fresh arena
///
/// Each step flips a coin between allocating a random size and freeing a
/// random live id (allocation is forced while nothing is live). Failed
/// allocations count as a step: a full arena under churn is exactly the
/// regime where fragmentation data matters.
pub fn run(strategy: Strategy, capacity: u64, config: &BenchConfig) -> Result<Vec<Sample>> {
    let mut arena = Arena::new(capacity)?;
    arena.set_strategy(strategy);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let max_alloc = config.max_alloc.max(1);
    let mut live: Vec<u32> = Vec::new();
    let mut samples = Vec::with_capacity(config.ops);

    for step in 0..config.ops {
        if live.is_empty() || rng.gen_bool(0.5) {
            let size = rng.gen_range(1..=max_alloc);
            if let Ok(id) = arena.allocate(size) {
                live.push(id);
            }
        } else {
            let pick = rng.gen_range(0..live.len());
            let id = live.swap_remove(pick);
            arena.free(id)?;
        }

        let report = arena.fragmentation_report();
        samples.push(Sample {
            step,
            total_free: report.total_free,
            largest_free: report.largest_free,
            fragment_count: report.fragment_count,
            fragmentation_ratio: report.external_fragmentation,
        });
    }

    debug!(
        "harness finished: {} steps under {}, {} ids still live",
        config.ops,
        strategy,
        live.len()
    );
    Ok(samples)
}

/// Write samples as CSV with a header row
///
/// The column set is a superset of what the plotting tooling expects
/// (`step` and `fragmentation_ratio`).
pub fn write_csv<W: Write>(samples: &[Sample], writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "step,total_free,largest_free,fragment_count,fragmentation_ratio"
    )?;
    for sample in samples {
        writeln!(
            writer,
            "{},{},{},{},{:.6}",
            sample.step,
            sample.total_free,
            sample.largest_free,
            sample.fragment_count,
            sample.fragmentation_ratio
        )?;
    }
    Ok(())
}
