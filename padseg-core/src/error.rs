//! Error types for padseg-core.

use thiserror::Error;

/// Result type alias for padseg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time errors for raw segmentation tables.
///
/// A failed validation aborts the whole build; no partially built
/// segmentation is ever published. Query misses (unknown card, position
/// outside every pad, ...) are not errors — queries return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The plane description contains no pad group.
    #[error("plane description contains no pad group")]
    EmptyPlane,

    /// A pad size is not strictly positive.
    #[error("pad size {index} is not strictly positive: ({width}, {height})")]
    NonPositivePadSize {
        /// Index of the offending size in the pad-size table.
        index: usize,
        /// Pad width.
        width: f64,
        /// Pad height.
        height: f64,
    },

    /// A pad group type grid has a zero dimension.
    #[error("pad group type grid must be non-empty, got {nx}x{ny}")]
    EmptyGroupType {
        /// Number of slot columns.
        nx: usize,
        /// Number of slot rows.
        ny: usize,
    },

    /// Slot list length does not match the declared grid dimensions.
    #[error("expected {expected} slots for a {nx}x{ny} grid, got {actual}")]
    SlotCountMismatch {
        /// Number of slot columns.
        nx: usize,
        /// Number of slot rows.
        ny: usize,
        /// `nx * ny`.
        expected: usize,
        /// Length of the slot list.
        actual: usize,
    },

    /// The same channel number appears twice within one pad group type.
    #[error("duplicate channel {channel} in pad group type")]
    DuplicateChannel {
        /// The repeated channel number.
        channel: u8,
    },

    /// A pad group references a pad group type that does not exist.
    #[error("pad group {group} references unknown pad group type {index}")]
    UnknownGroupType {
        /// Index of the offending group.
        group: usize,
        /// The dangling type reference.
        index: usize,
    },

    /// A pad group references a pad size that does not exist.
    #[error("pad group {group} references unknown pad size {index}")]
    UnknownPadSize {
        /// Index of the offending group.
        group: usize,
        /// The dangling size reference.
        index: usize,
    },

    /// An invalid bounding box was requested (min corner beyond max corner).
    #[error("invalid bounding box: ({xmin}, {ymin}) to ({xmax}, {ymax})")]
    InvalidBBox {
        /// Requested minimum x.
        xmin: f64,
        /// Requested minimum y.
        ymin: f64,
        /// Requested maximum x.
        xmax: f64,
        /// Requested maximum y.
        ymax: f64,
    },
}
