//! Geometric neighbour enumeration.
//!
//! Neighbours are found by probing 12 fixed positions just outside the pad
//! boundary and running the position query on each. The probes trace the
//! perimeter clockwise from the bottom-left corner, sampling corners and
//! edge thirds:
//!
//! ```text
//! 4- 5- 6-7
//! |       |
//! 3       8
//! |   0   |
//! 2       9
//! |       |
//! 1-12-11-10
//! ```
//!
//! A probe that stays inside the same oversized neighbour as the previous
//! accepted probe (shared edge with a coarser pad pitch) is dropped, so a
//! density discontinuity yields more neighbours on the finer side without
//! double-counting on the coarser one.

use padseg_core::PadId;

use crate::segmentation::CathodeSegmentation;

const THIRD: f64 = 1.0 / 3.0;

/// Probe offsets in units of (half-width, half-height).
const PROBES: [(f64, f64); 12] = [
    (-1.0, -1.0),
    (-1.0, -THIRD),
    (-1.0, THIRD),
    (-1.0, 1.0),
    (-THIRD, 1.0),
    (THIRD, 1.0),
    (1.0, 1.0),
    (1.0, THIRD),
    (1.0, -THIRD),
    (1.0, -1.0),
    (THIRD, -1.0),
    (-THIRD, -1.0),
];

/// Absolute margin pushing each probe beyond the pad edge.
const EPS: f64 = 2e-5;

impl CathodeSegmentation {
    /// The neighbours of a pad, in probe (clockwise) order, between 0 and
    /// 12 entries. Only consecutive duplicate hits are merged.
    ///
    /// # Panics
    /// Panics if `pad` is not a pad of this segmentation.
    pub fn neighbours(&self, pad: PadId) -> Vec<PadId> {
        let px = self.pad_position_x(pad);
        let py = self.pad_position_y(pad);
        let dx = self.pad_size_x(pad) / 2.0;
        let dy = self.pad_size_y(pad) / 2.0;
        let mut neighbours = Vec::with_capacity(PROBES.len());
        let mut previous = None;
        for (sx, sy) in PROBES {
            let found = self.find_pad_by_position(px + (dx + EPS) * sx, py + (dy + EPS) * sy);
            if let Some(hit) = found {
                if previous != Some(hit) {
                    previous = Some(hit);
                    neighbours.push(hit);
                }
            }
        }
        neighbours
    }
}
