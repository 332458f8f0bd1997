//! Pad group building blocks: sizes, tiling types, placed groups.

use crate::pad::{CardId, Channel};
use crate::{Error, Result};

/// A pad size shared by reference across pad groups.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PadSize {
    /// Pad width (cm).
    pub width: f64,
    /// Pad height (cm).
    pub height: f64,
}

impl PadSize {
    /// Creates a new pad size.
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The internal tiling of one kind of rectangular pad block.
///
/// A grid of `nx * ny` slots, some of which may be absent (non-rectangular
/// cutouts). Each present slot carries an electronics channel number and a
/// dense fast index in `0..nof_pads`, assigned in row-major (x-fastest)
/// order among present slots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPadGroupType", into = "RawPadGroupType")
)]
pub struct PadGroupType {
    nx: usize,
    ny: usize,
    /// Fast index per grid slot, row-major, `None` for absent slots.
    fast_of_slot: Vec<Option<u16>>,
    /// Channel per fast index.
    channels: Vec<Channel>,
    /// Slot column per fast index.
    slot_x: Vec<u16>,
    /// Slot row per fast index.
    slot_y: Vec<u16>,
}

impl PadGroupType {
    /// Builds a pad group type from its slot grid.
    ///
    /// `slots` lists the channel of each grid slot in row-major (x-fastest)
    /// order, `None` marking absent slots.
    ///
    /// # Errors
    /// Fails if the grid has a zero dimension, if `slots.len() != nx * ny`,
    /// or if a channel number appears twice.
    pub fn new(nx: usize, ny: usize, slots: &[Option<Channel>]) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(Error::EmptyGroupType { nx, ny });
        }
        if slots.len() != nx * ny {
            return Err(Error::SlotCountMismatch {
                nx,
                ny,
                expected: nx * ny,
                actual: slots.len(),
            });
        }
        let mut seen = [false; 256];
        let mut fast_of_slot = vec![None; nx * ny];
        let mut channels = Vec::new();
        let mut slot_x = Vec::new();
        let mut slot_y = Vec::new();
        for iy in 0..ny {
            for ix in 0..nx {
                let slot = iy * nx + ix;
                let Some(channel) = slots[slot] else {
                    continue;
                };
                if seen[channel.0 as usize] {
                    return Err(Error::DuplicateChannel { channel: channel.0 });
                }
                seen[channel.0 as usize] = true;
                fast_of_slot[slot] = Some(channels.len() as u16);
                channels.push(channel);
                slot_x.push(ix as u16);
                slot_y.push(iy as u16);
            }
        }
        Ok(Self {
            nx,
            ny,
            fast_of_slot,
            channels,
            slot_x,
            slot_y,
        })
    }

    /// Number of present slots.
    #[inline]
    pub fn nof_pads(&self) -> usize {
        self.channels.len()
    }

    /// Number of slot columns.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of slot rows.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Fast index of slot (ix, iy), or `None` if the indices are out of the
    /// grid range or the slot is absent.
    #[inline]
    pub fn fast_index(&self, ix: usize, iy: usize) -> Option<usize> {
        if ix >= self.nx || iy >= self.ny {
            return None;
        }
        self.fast_of_slot[iy * self.nx + ix].map(usize::from)
    }

    /// Channel wired to the pad with the given fast index.
    ///
    /// # Panics
    /// Panics if `fast >= nof_pads()`; fast indices come from this type's
    /// own tables, so an out-of-range value is a bug, not bad data.
    #[inline]
    pub fn channel(&self, fast: usize) -> Channel {
        self.channels[fast]
    }

    /// Slot column of the pad with the given fast index.
    ///
    /// # Panics
    /// Panics if `fast >= nof_pads()`.
    #[inline]
    pub fn ix(&self, fast: usize) -> usize {
        usize::from(self.slot_x[fast])
    }

    /// Slot row of the pad with the given fast index.
    ///
    /// # Panics
    /// Panics if `fast >= nof_pads()`.
    #[inline]
    pub fn iy(&self, fast: usize) -> usize {
        usize::from(self.slot_y[fast])
    }
}

/// Serde mirror of [`PadGroupType`]: the declarative slot grid without the
/// derived index tables.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawPadGroupType {
    nx: usize,
    ny: usize,
    slots: Vec<Option<Channel>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPadGroupType> for PadGroupType {
    type Error = Error;

    fn try_from(raw: RawPadGroupType) -> Result<Self> {
        PadGroupType::new(raw.nx, raw.ny, &raw.slots)
    }
}

#[cfg(feature = "serde")]
impl From<PadGroupType> for RawPadGroupType {
    fn from(pgt: PadGroupType) -> Self {
        let mut slots = vec![None; pgt.nx * pgt.ny];
        for (slot, fast) in pgt.fast_of_slot.iter().enumerate() {
            if let Some(fast) = fast {
                slots[slot] = Some(pgt.channels[usize::from(*fast)]);
            }
        }
        Self {
            nx: pgt.nx,
            ny: pgt.ny,
            slots,
        }
    }
}

/// One placed instance of a pad group type.
///
/// The anchor is the bottom-left corner of the group's bounding box;
/// `group_type` and `pad_size` index the plane description's tables.
/// All pads of the group are read out by one front-end card.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PadGroup {
    /// Anchor x (cm).
    pub x: f64,
    /// Anchor y (cm).
    pub y: f64,
    /// Index into the pad-group-type table.
    pub group_type: usize,
    /// Index into the pad-size table.
    pub pad_size: usize,
    /// Front-end card wiring the whole group.
    pub card: CardId,
}
