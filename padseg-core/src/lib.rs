//! padseg-core: Core types for readout-pad segmentation.
//!
//! This crate provides the foundational types the segmentation engine is
//! built on: geometry primitives, identifier newtypes, the raw-table data
//! model (pad sizes, pad group types, placed pad groups) and the
//! table-provider seam.
//!

pub mod desc;
pub mod error;
pub mod geo;
pub mod group;
pub mod pad;
pub mod provider;

pub use desc::PlaneDescription;
pub use error::{Error, Result};
pub use geo::BBox;
pub use group::{PadGroup, PadGroupType, PadSize};
pub use pad::{CardId, Channel, DeId, PadId, Plane};
pub use provider::TableProvider;
