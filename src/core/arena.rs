//! Arena: the owned simulation state and its public operations
//!
//! One `Arena` models one fixed-capacity address space. It owns the segment
//! table, the id counter and the active strategy, so independent simulations
//! never share state and tests stay hermetic.

use crate::error::{MemsimError, Result};
use crate::segment::{Segment, SegmentTable};
use crate::stats::FragmentationReport;
use crate::strategy::Strategy;
use tracing::{debug, warn};

/// Simulated address space with pluggable placement strategies
///
/// # Examples
///
/// ```rust
/// use memsim_rs::Arena;
///
/// # fn main() -> memsim_rs::Result<()> {
/// let mut arena = Arena::new(1024)?;
/// let id = arena.allocate(800)?;
/// assert!(arena.allocate(300).is_err());
/// arena.free(id)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Arena {
    table: SegmentTable,
    next_id: u32,
    strategy: Strategy,
}

impl Arena {
    /// Create an arena whose address space holds `capacity` units
    pub fn new(capacity: u64) -> Result<Self> {
        if capacity == 0 {
            return Err(MemsimError::InvalidCapacity(capacity));
        }
        debug!("creating arena with capacity {}", capacity);
        Ok(Arena {
            table: SegmentTable::new(capacity),
            next_id: 1,
            strategy: Strategy::default(),
        })
    }

    /// Reset to one free segment spanning the whole capacity
    ///
    /// Invalidates every previously issued id and restarts the id counter
    /// at 1. The active strategy is kept.
    pub fn reset(&mut self) {
        debug!("resetting arena");
        self.table.reset();
        self.next_id = 1;
    }

    pub fn capacity(&self) -> u64 {
        self.table.capacity()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Change the active placement strategy; existing segments are untouched
    pub fn set_strategy(&mut self, strategy: Strategy) {
        if strategy == Strategy::Buddy && !self.capacity().is_power_of_two() {
            warn!(
                "buddy strategy on non-power-of-two capacity {}: merge partners may never align",
                self.capacity()
            );
        }
        self.strategy = strategy;
    }

    /// Ordered read-only view of the current layout
    pub fn snapshot(&self) -> &[Segment] {
        self.table.segments()
    }

    /// Allocate `size` units, returning the owner id
    ///
    /// Zero-size requests are clamped to one unit. The buddy strategy rounds
    /// the request up to the next power of two before searching and splits
    /// the chosen block down to that size. On failure the table is left
    /// unmodified.
    pub fn allocate(&mut self, size: u64) -> Result<u32> {
        let request = size.max(1);
        if request > self.capacity() {
            return Err(MemsimError::AllocationFailed { requested: size });
        }
        let request = match self.strategy {
            Strategy::Buddy => request.next_power_of_two(),
            _ => request,
        };

        let index = self
            .strategy
            .select(self.table.segments(), request)
            .ok_or(MemsimError::AllocationFailed { requested: size })?;

        if self.strategy == Strategy::Buddy {
            // Walk the block down to the rounded size; every halving leaves a
            // free twin behind, keeping starts aligned to their own size
            while self.table.segments()[index].size / 2 >= request {
                self.table.split_half(index);
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        let placed = match self.strategy {
            Strategy::Buddy => self.table.segments()[index].size,
            _ => request,
        };
        self.table.split_at(index, placed, id);

        let seg = self.table.segments()[index];
        debug!(
            "allocate({}) via {} -> id {} at [{}, {})",
            size,
            self.strategy,
            id,
            seg.start,
            seg.end()
        );
        Ok(id)
    }

    /// Release the segment owned by `id` and coalesce free neighbors
    ///
    /// The buddy strategy merges equal-size partners found at `start ^ size`
    /// until no partner is free; every other strategy merges by address
    /// adjacency alone.
    pub fn free(&mut self, id: u32) -> Result<()> {
        let index = self
            .table
            .find_used(id)
            .ok_or(MemsimError::FreeNotFound(id))?;

        let seg = self.table.segments()[index];
        debug!(
            "free({}) releasing [{}, {}) under {}",
            id,
            seg.start,
            seg.end(),
            self.strategy
        );

        self.table.mark_free(index);
        match self.strategy {
            Strategy::Buddy => self.merge_buddies(index),
            _ => {
                self.table.coalesce_linear(index);
            }
        }
        Ok(())
    }

    /// Repeatedly merge the free segment at `index` with its buddy
    ///
    /// The buddy of a size-aligned segment lives at `start ^ size`; a merge
    /// doubles the size, so the loop runs at most log2(capacity) times.
    fn merge_buddies(&mut self, mut index: usize) {
        loop {
            let seg = self.table.segments()[index];
            if seg.size >= self.capacity() {
                break;
            }
            let partner_start = seg.start ^ seg.size;
            let partner = self
                .table
                .segments()
                .iter()
                .position(|s| s.is_free() && s.start == partner_start && s.size == seg.size);
            let Some(partner_index) = partner else {
                break;
            };
            // Equal-size partners differ by exactly `size`, so they are
            // address-adjacent and therefore table-adjacent
            index = self.table.merge_pair(index.min(partner_index));
        }
    }

    /// Free-space statistics for the current layout
    pub fn fragmentation_report(&self) -> FragmentationReport {
        FragmentationReport::from_segments(self.table.segments())
    }
}
