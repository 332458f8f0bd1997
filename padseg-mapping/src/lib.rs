//! padseg-mapping: the cathode segmentation engine.
//!
//! Builds, from the raw pad-group tables of a detector plane, a read-only
//! structure answering three kinds of queries at high rates:
//!
//! - position to pad: [`CathodeSegmentation::find_pad_by_position`]
//! - electronics address to pad: [`CathodeSegmentation::find_pad_by_fee`]
//! - pad to geometric neighbours: [`CathodeSegmentation::neighbours`]
//!
//! plus the reverse per-pad accessors (center position, size, card,
//! channel). [`Segmentation`] pairs the two cathode planes of a detection
//! element, [`SegmentationRegistry`] selects the builder strategy by
//! configuration, and [`SegCache`] memoizes built elements behind a
//! [`TableProvider`].
#![warn(missing_docs)]

pub mod cache;
mod error;
pub mod grid;
mod index;
mod neighbour;
mod plane;
pub mod registry;
mod segmentation;

pub use cache::{CathodeRef, SegCache};
pub use error::BuildError;
pub use grid::PadGroupGrid;
pub use plane::{PadUid, Segmentation};
pub use registry::{BuilderFn, SegmentationRegistry, GRID_STRATEGY};
pub use segmentation::CathodeSegmentation;

// Re-export core types for convenience
pub use padseg_core::{
    BBox, CardId, Channel, DeId, Error, PadGroup, PadGroupType, PadId, PadSize, Plane,
    PlaneDescription, TableProvider,
};
