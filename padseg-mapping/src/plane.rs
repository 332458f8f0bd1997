//! The dual-plane segmentation of one detection element.

use std::fmt;

use padseg_core::{CardId, Channel, DeId, PadId, Plane, PlaneDescription};

use crate::error::BuildError;
use crate::registry::SegmentationRegistry;
use crate::segmentation::CathodeSegmentation;

/// Pad identifier within a dual-plane [`Segmentation`].
///
/// Bending pads keep their per-plane id value; non-bending pads are offset
/// by the bending plane's pad count, so uids are dense over
/// `0..nof_pads()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PadUid(pub u32);

impl PadUid {
    /// Returns the uid as a table index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PadUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pad uid {}", self.0)
    }
}

/// Both cathode planes of one detection element.
///
/// The two planes are independent, self-contained segmentations; this
/// wrapper only unifies their pad identifier spaces and routes queries.
#[derive(Debug)]
pub struct Segmentation {
    deid: DeId,
    bending: CathodeSegmentation,
    non_bending: CathodeSegmentation,
}

impl Segmentation {
    /// Builds both cathode planes with the default strategy.
    ///
    /// # Errors
    /// Fails if either plane description is malformed.
    pub fn build(
        deid: DeId,
        bending: PlaneDescription,
        non_bending: PlaneDescription,
    ) -> Result<Self, BuildError> {
        Self::build_with(&SegmentationRegistry::default(), deid, bending, non_bending)
    }

    /// Builds both cathode planes through a registry's active strategy.
    /// The planes share nothing, so they build concurrently.
    ///
    /// # Errors
    /// Fails if the registry has no usable strategy or either description
    /// is malformed.
    pub fn build_with(
        registry: &SegmentationRegistry,
        deid: DeId,
        bending: PlaneDescription,
        non_bending: PlaneDescription,
    ) -> Result<Self, BuildError> {
        let (bending, non_bending) = rayon::join(
            || registry.build(deid, Plane::Bending, bending),
            || registry.build(deid, Plane::NonBending, non_bending),
        );
        Ok(Self {
            deid,
            bending: bending?,
            non_bending: non_bending?,
        })
    }

    /// The detection element.
    #[inline]
    pub fn det_elem_id(&self) -> DeId {
        self.deid
    }

    /// One cathode plane's segmentation.
    #[inline]
    pub fn cathode(&self, plane: Plane) -> &CathodeSegmentation {
        match plane {
            Plane::Bending => &self.bending,
            Plane::NonBending => &self.non_bending,
        }
    }

    /// Total pad count over both planes.
    #[inline]
    pub fn nof_pads(&self) -> usize {
        self.bending.nof_pads() + self.non_bending.nof_pads()
    }

    /// Total card count over both planes (card id sets are disjoint).
    #[inline]
    pub fn nof_cards(&self) -> usize {
        self.bending.nof_cards() + self.non_bending.nof_cards()
    }

    #[inline]
    fn offset(&self) -> u32 {
        self.bending.nof_pads() as u32
    }

    /// Whether the uid belongs to the bending plane.
    #[inline]
    pub fn is_bending_pad(&self, uid: PadUid) -> bool {
        uid.0 < self.offset()
    }

    /// Splits a uid into its plane and per-plane pad id.
    #[inline]
    pub fn split(&self, uid: PadUid) -> (Plane, PadId) {
        if self.is_bending_pad(uid) {
            (Plane::Bending, PadId(uid.0))
        } else {
            (Plane::NonBending, PadId(uid.0 - self.offset()))
        }
    }

    /// Lifts a per-plane pad id into the unified uid space.
    #[inline]
    pub fn lift(&self, plane: Plane, pad: PadId) -> PadUid {
        match plane {
            Plane::Bending => PadUid(pad.0),
            Plane::NonBending => PadUid(pad.0 + self.offset()),
        }
    }

    /// Iterates all pad uids of both planes, bending first.
    pub fn pads(&self) -> impl Iterator<Item = PadUid> {
        (0..self.nof_pads() as u32).map(PadUid)
    }

    /// Finds the pad of each plane containing (x, y).
    pub fn find_pad_pair_by_position(&self, x: f64, y: f64) -> (Option<PadUid>, Option<PadUid>) {
        (
            self.bending
                .find_pad_by_position(x, y)
                .map(|p| self.lift(Plane::Bending, p)),
            self.non_bending
                .find_pad_by_position(x, y)
                .map(|p| self.lift(Plane::NonBending, p)),
        )
    }

    /// Finds the pad read out by (card, channel) on either plane. Card id
    /// sets of the two planes are disjoint, so at most one plane matches.
    pub fn find_pad_by_fee(&self, card: CardId, channel: Channel) -> Option<PadUid> {
        if let Some(pad) = self.bending.find_pad_by_fee(card, channel) {
            return Some(self.lift(Plane::Bending, pad));
        }
        self.non_bending
            .find_pad_by_fee(card, channel)
            .map(|p| self.lift(Plane::NonBending, p))
    }

    /// The neighbours of a pad, on the pad's own plane only.
    ///
    /// # Panics
    /// Panics if `uid` is out of range.
    pub fn neighbours(&self, uid: PadUid) -> Vec<PadUid> {
        let (plane, pad) = self.split(uid);
        self.cathode(plane)
            .neighbours(pad)
            .into_iter()
            .map(|p| self.lift(plane, p))
            .collect()
    }

    /// X position of the pad center.
    ///
    /// # Panics
    /// Panics if `uid` is out of range, as do the accessors below.
    pub fn pad_position_x(&self, uid: PadUid) -> f64 {
        let (plane, pad) = self.split(uid);
        self.cathode(plane).pad_position_x(pad)
    }

    /// Y position of the pad center.
    pub fn pad_position_y(&self, uid: PadUid) -> f64 {
        let (plane, pad) = self.split(uid);
        self.cathode(plane).pad_position_y(pad)
    }

    /// Width of the pad.
    pub fn pad_size_x(&self, uid: PadUid) -> f64 {
        let (plane, pad) = self.split(uid);
        self.cathode(plane).pad_size_x(pad)
    }

    /// Height of the pad.
    pub fn pad_size_y(&self, uid: PadUid) -> f64 {
        let (plane, pad) = self.split(uid);
        self.cathode(plane).pad_size_y(pad)
    }

    /// Front-end card reading the pad out.
    pub fn pad_card(&self, uid: PadUid) -> CardId {
        let (plane, pad) = self.split(uid);
        self.cathode(plane).pad_card(pad)
    }

    /// Channel the pad is wired to on its card.
    pub fn pad_channel(&self, uid: PadUid) -> Channel {
        let (plane, pad) = self.split(uid);
        self.cathode(plane).pad_channel(pad)
    }
}
