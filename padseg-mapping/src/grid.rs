//! Uniform spatial grid over the pad-group bounding boxes.
//!
//! The grid is a coarse pre-filter for the position query: each cell lists
//! the pad groups whose bounding box intersects it. A group may sit in
//! several cells, a cell may be empty; cells are not an exact partition of
//! the pads, only of the plane bounding box.

use padseg_core::BBox;

/// Upper bound on the cell count per axis. Keeps the cell-times-group fill
/// bounded for degenerate descriptions.
const MAX_CELLS_PER_AXIS: usize = 64;

static NO_GROUPS: &[u16] = &[];

/// A uniform grid assigning pad groups to rectangular cells.
#[derive(Debug)]
pub struct PadGroupGrid {
    bbox: BBox,
    nx: usize,
    ny: usize,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Vec<u16>>,
}

impl PadGroupGrid {
    /// Builds the grid over `bbox` from the group bounding boxes.
    ///
    /// The cell count per axis is derived from the group count alone
    /// (never from query patterns) and the grid always covers the full
    /// bounding box.
    pub fn new(bbox: BBox, group_boxes: &[BBox]) -> Self {
        #[allow(
            clippy::cast_sign_loss,
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss
        )]
        let n = (group_boxes.len() as f64).sqrt().ceil() as usize;
        let n = n.clamp(1, MAX_CELLS_PER_AXIS);
        let mut grid = Self {
            bbox,
            nx: n,
            ny: n,
            cell_width: bbox.width() / n as f64,
            cell_height: bbox.height() / n as f64,
            cells: vec![Vec::new(); n * n],
        };
        for index in 0..grid.cells.len() {
            let cbox = grid.cell_box(index);
            for (gi, gbox) in group_boxes.iter().enumerate() {
                if cbox.intersection(gbox).is_some() {
                    grid.cells[index].push(gi as u16);
                }
            }
        }
        grid
    }

    /// Number of cells.
    #[inline]
    pub fn nof_cells(&self) -> usize {
        self.cells.len()
    }

    /// Bounding box of one cell.
    ///
    /// # Panics
    /// Panics if `index >= nof_cells()`.
    pub fn cell_box(&self, index: usize) -> BBox {
        assert!(index < self.cells.len(), "cell index {index} out of range");
        let cx = index % self.nx;
        let cy = index / self.nx;
        let xmin = self.bbox.xmin() + cx as f64 * self.cell_width;
        let ymin = self.bbox.ymin() + cy as f64 * self.cell_height;
        BBox::new(xmin, ymin, xmin + self.cell_width, ymin + self.cell_height)
            .expect("cell dimensions are non-negative")
    }

    /// The candidate groups for a position: the content of the cell
    /// containing (x, y), or an empty slice outside the plane bounding box.
    ///
    /// Points on the shared edge of two cells belong to the higher cell;
    /// the closed upper edges of the bounding box fold into the last cell,
    /// so every covered point maps to exactly one cell.
    pub fn groups_at(&self, x: f64, y: f64) -> &[u16] {
        if !self.bbox.contains(x, y) {
            return NO_GROUPS;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let cx = (((x - self.bbox.xmin()) / self.cell_width) as usize).min(self.nx - 1);
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let cy = (((y - self.bbox.ymin()) / self.cell_height) as usize).min(self.ny - 1);
        &self.cells[cy * self.nx + cx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> BBox {
        BBox::new(xmin, ymin, xmax, ymax).unwrap()
    }

    #[test]
    fn test_every_group_lands_in_some_cell() {
        let boxes = vec![
            bbox(0.0, 0.0, 2.0, 2.0),
            bbox(2.0, 0.0, 4.0, 2.0),
            bbox(0.0, 2.0, 4.0, 6.0),
        ];
        let grid = PadGroupGrid::new(bbox(0.0, 0.0, 4.0, 6.0), &boxes);
        let mut seen = [false; 3];
        for index in 0..grid.nof_cells() {
            let cbox = grid.cell_box(index);
            for (gi, gbox) in boxes.iter().enumerate() {
                if cbox.intersection(gbox).is_some() {
                    seen[gi] = true;
                }
            }
        }
        assert_eq!(seen, [true, true, true]);
        // a point well inside group 2 yields a candidate list containing it
        assert!(grid.groups_at(1.0, 5.0).contains(&2));
    }

    #[test]
    fn test_outside_bbox_is_empty() {
        let boxes = vec![bbox(0.0, 0.0, 2.0, 2.0)];
        let grid = PadGroupGrid::new(bbox(0.0, 0.0, 2.0, 2.0), &boxes);
        assert!(grid.groups_at(-0.1, 1.0).is_empty());
        assert!(grid.groups_at(1.0, 2.1).is_empty());
    }

    #[test]
    fn test_closed_upper_edge_maps_to_last_cell() {
        let boxes: Vec<BBox> = (0..9).map(|_| bbox(0.0, 0.0, 3.0, 3.0)).collect();
        let grid = PadGroupGrid::new(bbox(0.0, 0.0, 3.0, 3.0), &boxes);
        // the far corner is covered, not dropped
        assert!(!grid.groups_at(3.0, 3.0).is_empty());
    }

    #[test]
    fn test_single_group_uses_one_cell() {
        let boxes = vec![bbox(0.0, 0.0, 1.0, 1.0)];
        let grid = PadGroupGrid::new(bbox(0.0, 0.0, 1.0, 1.0), &boxes);
        assert_eq!(grid.nof_cells(), 1);
        assert_eq!(grid.groups_at(0.5, 0.5), &[0]);
    }
}
