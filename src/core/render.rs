//! Console renderers for segment snapshots
//!
//! Purely presentational: both renderers map a snapshot to text and carry no
//! invariants back into the engine.

use crate::segment::Segment;
use std::fmt::Write;

/// Default width of the ASCII map, in cells
pub const DEFAULT_MAP_WIDTH: usize = 64;

/// One line per segment: address range, state, owner and size
///
/// ```text
/// [0 - 799] Used (ID: 1) Size: 800
/// [800 - 1023] Free Size: 224
/// ```
pub fn format_layout(segments: &[Segment]) -> String {
    let mut out = String::new();
    for seg in segments {
        if seg.used {
            let _ = writeln!(
                out,
                "[{} - {}] Used (ID: {}) Size: {}",
                seg.start,
                seg.end() - 1,
                seg.id,
                seg.size
            );
        } else {
            let _ = writeln!(
                out,
                "[{} - {}] Free Size: {}",
                seg.start,
                seg.end() - 1,
                seg.size
            );
        }
    }
    out
}

/// Fixed-width map of the address space, `#` for used cells, `.` for free
///
/// Each cell samples the segment covering the proportional address, so the
/// map stays `width` cells regardless of capacity or fragment count.
pub fn format_ascii(segments: &[Segment], width: usize) -> String {
    let capacity = match segments.last() {
        Some(seg) => seg.end(),
        None => return "||".to_string(),
    };

    let mut out = String::with_capacity(width + 2);
    out.push('|');
    let mut cursor = 0usize;
    for cell in 0..width {
        let address = (cell as u64 * capacity) / width as u64;
        while segments[cursor].end() <= address {
            cursor += 1;
        }
        out.push(if segments[cursor].used { '#' } else { '.' });
    }
    out.push('|');
    out
}
