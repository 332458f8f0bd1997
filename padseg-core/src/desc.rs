//! Raw segmentation tables for one cathode plane.
//!
//! A [`PlaneDescription`] is the declarative input the segmentation engine
//! consumes: pad sizes, pad group types and placed pad groups with their
//! front-end wiring. Descriptions are produced by an external table provider
//! per detection element; with the `serde` feature they can also be injected
//! as JSON.

use crate::group::{PadGroup, PadGroupType, PadSize};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use std::fs::File;
#[cfg(feature = "serde")]
use std::io::BufReader;
#[cfg(feature = "serde")]
use std::path::Path;

/// The raw tables describing one cathode plane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneDescription {
    /// Pad sizes, referenced by index from the groups.
    pub pad_sizes: Vec<PadSize>,
    /// Pad group types, referenced by index from the groups.
    pub group_types: Vec<PadGroupType>,
    /// Placed pad groups, in construction order.
    pub groups: Vec<PadGroup>,
}

impl PlaneDescription {
    /// Checks the internal consistency of the tables.
    ///
    /// # Errors
    /// Fails on an empty group list, a non-positive pad size, or a group
    /// referencing a type or size that does not exist. Group-type internal
    /// invariants are enforced by [`PadGroupType::new`] already.
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(Error::EmptyPlane);
        }
        for (index, size) in self.pad_sizes.iter().enumerate() {
            if size.width <= 0.0 || size.height <= 0.0 {
                return Err(Error::NonPositivePadSize {
                    index,
                    width: size.width,
                    height: size.height,
                });
            }
        }
        for (group, pg) in self.groups.iter().enumerate() {
            if pg.group_type >= self.group_types.len() {
                return Err(Error::UnknownGroupType {
                    group,
                    index: pg.group_type,
                });
            }
            if pg.pad_size >= self.pad_sizes.len() {
                return Err(Error::UnknownPadSize {
                    group,
                    index: pg.pad_size,
                });
            }
        }
        Ok(())
    }

    /// Total number of pads described (sum of present slots over groups).
    ///
    /// Only meaningful on a validated description.
    pub fn nof_pads(&self) -> usize {
        self.groups
            .iter()
            .map(|pg| self.group_types[pg.group_type].nof_pads())
            .sum()
    }

    /// Loads and validates a description from a JSON string.
    ///
    /// # Errors
    /// Returns a boxed error on malformed JSON or inconsistent tables.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let desc: Self = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    /// Loads and validates a description from a JSON file.
    ///
    /// # Errors
    /// Returns a boxed error on I/O failure, malformed JSON or inconsistent
    /// tables.
    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let desc: Self = serde_json::from_reader(reader)?;
        desc.validate()?;
        Ok(desc)
    }
}
