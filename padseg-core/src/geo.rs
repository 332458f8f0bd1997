//! Geometry primitives: axis-aligned bounding boxes.

use crate::{Error, Result};

/// An axis-aligned bounding box in detector-plane coordinates (cm).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl BBox {
    /// Creates a bounding box, checking corner ordering.
    ///
    /// # Errors
    /// Returns [`Error::InvalidBBox`] if the min corner is beyond the max
    /// corner on either axis. Degenerate (zero-width or zero-height) boxes
    /// are allowed.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        if xmin > xmax || ymin > ymax {
            return Err(Error::InvalidBBox {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Returns the minimum x coordinate.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Returns the minimum y coordinate.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// Returns the maximum x coordinate.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Returns the maximum y coordinate.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Returns the box width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Returns the box height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Returns the center of the box.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.xmin + self.xmax),
            0.5 * (self.ymin + self.ymax),
        )
    }

    /// Checks whether (x, y) lies within the box. Edges are inclusive.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    /// Computes the intersection with another box, or `None` if the boxes
    /// do not overlap. Boxes sharing only an edge produce a degenerate
    /// (zero-area) intersection, which still counts as overlapping.
    pub fn intersection(&self, other: &BBox) -> Option<BBox> {
        let xmin = self.xmin.max(other.xmin);
        let ymin = self.ymin.max(other.ymin);
        let xmax = self.xmax.min(other.xmax);
        let ymax = self.ymax.min(other.ymax);
        if xmin > xmax || ymin > ymax {
            return None;
        }
        Some(BBox {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Returns the smallest box enclosing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }
}
