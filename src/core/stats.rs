//! Fragmentation reporting
//!
//! Pure, read-only derivation over a segment snapshot; nothing here mutates
//! the table.

use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// Free-space statistics derived from the current segment table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragmentationReport {
    /// Sum of all free segment sizes
    pub total_free: u64,
    /// Size of the largest free segment, 0 when none
    pub largest_free: u64,
    /// Number of free segments
    pub fragment_count: usize,
    /// Fraction of free space outside the largest free segment
    ///
    /// Defined as `1 - largest_free / total_free`, forced to 0 when free
    /// space is empty or forms a single run (fragmentation is definitionally
    /// zero there, and the ratio would otherwise divide by zero or mislead).
    pub external_fragmentation: f64,
}

impl FragmentationReport {
    /// Compute the report for a segment snapshot
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut total_free = 0u64;
        let mut largest_free = 0u64;
        let mut fragment_count = 0usize;

        for seg in segments.iter().filter(|s| s.is_free()) {
            total_free += seg.size;
            largest_free = largest_free.max(seg.size);
            fragment_count += 1;
        }

        let external_fragmentation = if total_free == 0 || largest_free == 0 || fragment_count <= 1
        {
            0.0
        } else {
            1.0 - largest_free as f64 / total_free as f64
        };

        FragmentationReport {
            total_free,
            largest_free,
            fragment_count,
            external_fragmentation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn used(start: u64, size: u64, id: u32) -> Segment {
        Segment {
            start,
            size,
            used: true,
            id,
        }
    }

    #[test]
    fn test_fully_used_reports_zero() {
        let report = FragmentationReport::from_segments(&[used(0, 1024, 1)]);
        assert_eq!(report.total_free, 0);
        assert_eq!(report.largest_free, 0);
        assert_eq!(report.fragment_count, 0);
        assert_eq!(report.external_fragmentation, 0.0);
    }

    #[test]
    fn test_single_free_run_is_not_fragmented() {
        let segments = [used(0, 512, 1), Segment::free_at(512, 512)];
        let report = FragmentationReport::from_segments(&segments);
        assert_eq!(report.total_free, 512);
        assert_eq!(report.largest_free, 512);
        assert_eq!(report.fragment_count, 1);
        assert_eq!(report.external_fragmentation, 0.0);
    }

    #[test]
    fn test_scattered_free_space() {
        // used 100/50/30 remain, free runs of 120 and 574
        let segments = [
            used(0, 100, 1),
            Segment::free_at(100, 120),
            used(220, 50, 2),
            Segment::free_at(270, 574),
            used(844, 30, 3),
        ];
        let report = FragmentationReport::from_segments(&segments);
        assert_eq!(report.total_free, 694);
        assert_eq!(report.largest_free, 574);
        assert_eq!(report.fragment_count, 2);
        let expected = 1.0 - 574.0 / 694.0;
        assert!((report.external_fragmentation - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_snapshot() {
        let report = FragmentationReport::from_segments(&[]);
        assert_eq!(report.fragment_count, 0);
        assert_eq!(report.external_fragmentation, 0.0);
    }
}
