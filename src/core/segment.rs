//! Segment table for the simulated address space
//!
//! The table is an ordered sequence of contiguous segments covering the whole
//! space with no gaps or overlaps. It is the single source of truth for the
//! layout; allocation and release only mutate it through the split/merge
//! primitives below.

use serde::{Deserialize, Serialize};

/// A contiguous run of address space, either wholly used or wholly free
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Offset of the first unit
    pub start: u64,
    /// Length in units, always nonzero
    pub size: u64,
    /// Whether the segment is currently allocated
    pub used: bool,
    /// Owner id; 0 means "no owner" (free segment)
    pub id: u32,
}

impl Segment {
    /// Create a free segment covering `[start, start + size)`
    pub fn free_at(start: u64, size: u64) -> Self {
        Segment {
            start,
            size,
            used: false,
            id: 0,
        }
    }

    /// One past the last unit covered by this segment
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        !self.used
    }
}

/// Ordered segment table covering a fixed-capacity address space
///
/// Invariants (hold after every public operation):
/// - segments are sorted by `start`, first starts at 0
/// - each segment's end equals the next segment's start
/// - sizes sum to the capacity
/// - used segments carry pairwise-distinct nonzero ids, free segments id 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentTable {
    segments: Vec<Segment>,
    capacity: u64,
}

impl SegmentTable {
    /// Create a table with one free segment spanning the whole capacity
    pub fn new(capacity: u64) -> Self {
        SegmentTable {
            segments: vec![Segment::free_at(0, capacity)],
            capacity,
        }
    }

    /// Replace the table with one free segment spanning the whole capacity
    ///
    /// Side effect: every previously issued id stops referencing a segment.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.segments.push(Segment::free_at(0, self.capacity));
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Ordered read-only view of the current layout
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Index of the used segment owned by `id`, if any
    pub fn find_used(&self, id: u32) -> Option<usize> {
        self.segments.iter().position(|s| s.used && s.id == id)
    }

    /// Carve `size` units out of the free segment at `index` and mark them
    /// used with owner `id`
    ///
    /// The segment shrinks to `size`; any remainder is re-inserted
    /// immediately after as a free segment. `size == segment.size` leaves the
    /// neighbor list untouched.
    pub fn split_at(&mut self, index: usize, size: u64, id: u32) {
        let seg = &mut self.segments[index];
        debug_assert!(seg.is_free(), "split_at target must be free");
        debug_assert!(size > 0 && size <= seg.size, "split_at size out of range");

        let leftover = seg.size - size;
        seg.size = size;
        seg.used = true;
        seg.id = id;
        let remainder_start = seg.start + size;

        if leftover > 0 {
            self.segments
                .insert(index + 1, Segment::free_at(remainder_start, leftover));
        }
        self.debug_validate();
    }

    /// Halve the free segment at `index`, inserting its upper twin after it
    ///
    /// Used by the buddy policy to walk a free block down to the rounded
    /// request size. For even sizes both halves are exact; odd sizes give
    /// the upper twin the extra unit.
    pub fn split_half(&mut self, index: usize) {
        let seg = &mut self.segments[index];
        debug_assert!(seg.is_free(), "split_half target must be free");
        debug_assert!(seg.size >= 2, "split_half target too small");

        let lower = seg.size / 2;
        let twin = Segment::free_at(seg.start + lower, seg.size - lower);
        seg.size = lower;
        self.segments.insert(index + 1, twin);
        self.debug_validate();
    }

    /// Release the segment at `index` without coalescing
    pub fn mark_free(&mut self, index: usize) {
        let seg = &mut self.segments[index];
        seg.used = false;
        seg.id = 0;
        self.debug_validate();
    }

    /// Merge the free segment at `index` with free address-adjacent neighbors
    ///
    /// Forward merge first, then backward, so a single free run collapses in
    /// one pass regardless of which side triggered it. Returns the index of
    /// the surviving segment.
    pub fn coalesce_linear(&mut self, mut index: usize) -> usize {
        debug_assert!(self.segments[index].is_free());

        if index + 1 < self.segments.len() && self.segments[index + 1].is_free() {
            self.segments[index].size += self.segments[index + 1].size;
            self.segments.remove(index + 1);
        }
        if index > 0 && self.segments[index - 1].is_free() {
            self.segments[index - 1].size += self.segments[index].size;
            self.segments.remove(index);
            index -= 1;
        }
        self.debug_validate();
        index
    }

    /// Merge the free segment at `lower` with the free segment right after it
    ///
    /// Both must be free and address-adjacent; the pair becomes one segment
    /// of their combined size. Returns the index of the merged segment.
    pub fn merge_pair(&mut self, lower: usize) -> usize {
        debug_assert!(lower + 1 < self.segments.len());
        debug_assert!(self.segments[lower].is_free() && self.segments[lower + 1].is_free());
        debug_assert_eq!(self.segments[lower].end(), self.segments[lower + 1].start);

        self.segments[lower].size += self.segments[lower + 1].size;
        self.segments.remove(lower + 1);
        self.debug_validate();
        lower
    }

    /// Debug-build invariant check; a failure here is an engine bug, never a
    /// caller-visible state
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            let mut expected_start = 0u64;
            let mut seen_ids = std::collections::HashSet::new();
            for seg in &self.segments {
                debug_assert_eq!(seg.start, expected_start, "segment coverage gap/overlap");
                debug_assert!(seg.size > 0, "zero-size segment");
                if seg.used {
                    debug_assert!(seg.id != 0, "used segment without owner id");
                    debug_assert!(seen_ids.insert(seg.id), "duplicate owner id {}", seg.id);
                } else {
                    debug_assert_eq!(seg.id, 0, "free segment with owner id");
                }
                expected_start = seg.end();
            }
            debug_assert_eq!(expected_start, self.capacity, "coverage != capacity");
        }
    }
}
