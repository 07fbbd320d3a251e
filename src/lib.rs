//! # Memsim - Memory Allocation Strategy Simulator
//!
//! `memsim-rs` models a single linear address space and simulates dynamic
//! memory allocation over it. Four placement strategies are supported and can
//! be switched at runtime:
//!
//! - **First-fit**: take the first hole large enough
//! - **Best-fit**: take the smallest hole large enough
//! - **Worst-fit**: take the largest hole
//! - **Buddy**: power-of-two rounding with split/merge along buddy boundaries
//!
//! Allocations split free segments, releases coalesce them back together, and
//! a pure fragmentation reporter derives free-space statistics from the
//! segment table at any point.
//!
//! ## Quick Start
//!
//! ```rust
//! use memsim_rs::{Arena, Strategy};
//!
//! # fn main() -> memsim_rs::Result<()> {
//! // One arena == one simulated address space
//! let mut arena = Arena::new(1024)?;
//! arena.set_strategy(Strategy::BestFit);
//!
//! let id = arena.allocate(128)?;
//! assert_eq!(arena.fragmentation_report().total_free, 896);
//!
//! arena.free(id)?;
//! assert_eq!(arena.snapshot().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! The interactive shell (`memsim-shell`) and the benchmark runner
//! (`memsim-bench`) are thin front-ends over the same [`Arena`] operations.

// Core implementation
pub mod core;

// Re-export core modules internally so crate:: paths stay short
#[allow(unused_imports)]
pub(crate) use crate::core::{arena, error, harness, render, segment, stats, strategy};

// Re-export core types that users need
pub use crate::core::{
    arena::Arena,
    error::{MemsimError, Result},
    harness::{run as run_benchmark, write_csv, BenchConfig, Sample},
    render::{format_ascii, format_layout, DEFAULT_MAP_WIDTH},
    segment::{Segment, SegmentTable},
    stats::FragmentationReport,
    strategy::Strategy,
};
