//! Identifier types for detector elements, pads and electronics addresses.

use std::fmt;

/// Detection element identifier: one physical detector plane instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeId(pub u16);

impl fmt::Display for DeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DE{}", self.0)
    }
}

/// One of the two cathode planes of a detection element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Plane {
    /// The bending plane.
    Bending,
    /// The non-bending plane.
    NonBending,
}

impl Plane {
    /// Returns true for the bending plane.
    #[inline]
    pub fn is_bending(self) -> bool {
        self == Plane::Bending
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::Bending => write!(f, "bending"),
            Plane::NonBending => write!(f, "non-bending"),
        }
    }
}

/// Front-end electronics card identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId(pub u16);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FEC {}", self.0)
    }
}

/// Channel number within a front-end card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(pub u8);

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CH {}", self.0)
    }
}

/// Dense pad identifier within one cathode segmentation.
///
/// Pad ids are contiguous in `0..nof_pads`, assigned at construction time in
/// pad-group order then in-group fast-index order. All pads of a group
/// occupy a contiguous id range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PadId(pub u32);

impl PadId {
    /// Returns the id as a table index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pad {}", self.0)
    }
}
