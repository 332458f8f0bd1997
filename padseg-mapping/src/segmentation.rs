//! The cathode segmentation: one plane's pads, wiring and spatial index.

use log::debug;

use padseg_core::{
    BBox, CardId, Channel, DeId, PadGroup, PadGroupType, PadId, PadSize, Plane, PlaneDescription,
    Result,
};

use crate::grid::PadGroupGrid;
use crate::index::IndexTables;

/// The segmentation of one cathode plane of a detection element.
///
/// Built once from a validated [`PlaneDescription`]; immutable afterwards,
/// so concurrent unsynchronized reads are safe. All queries are total:
/// lookups that can miss return `Option`, per-pad accessors require a
/// [`PadId`] obtained from this segmentation (see [`Self::is_valid`]).
#[derive(Debug)]
pub struct CathodeSegmentation {
    deid: DeId,
    plane: Plane,
    groups: Vec<PadGroup>,
    group_types: Vec<PadGroupType>,
    pad_sizes: Vec<PadSize>,
    index: IndexTables,
    grid: PadGroupGrid,
    bbox: BBox,
}

fn group_box(pg: &PadGroup, types: &[PadGroupType], sizes: &[PadSize]) -> BBox {
    let pgt = &types[pg.group_type];
    let size = sizes[pg.pad_size];
    let dx = size.width * pgt.nx() as f64;
    let dy = size.height * pgt.ny() as f64;
    BBox::new(pg.x, pg.y, pg.x + dx, pg.y + dy).expect("pad sizes are validated positive")
}

impl CathodeSegmentation {
    /// Builds the segmentation for one cathode plane.
    ///
    /// All-or-nothing: the description is validated first and any
    /// inconsistency aborts the build before anything is assembled.
    ///
    /// # Errors
    /// Returns a construction error for malformed tables (empty plane,
    /// non-positive pad size, dangling type/size references).
    pub fn build(deid: DeId, plane: Plane, desc: PlaneDescription) -> Result<Self> {
        desc.validate()?;
        let PlaneDescription {
            pad_sizes,
            group_types,
            groups,
        } = desc;

        let index = IndexTables::build(&groups, &group_types);
        let group_boxes: Vec<BBox> = groups
            .iter()
            .map(|pg| group_box(pg, &group_types, &pad_sizes))
            .collect();
        let bbox = group_boxes[1..]
            .iter()
            .fold(group_boxes[0], |acc, b| acc.union(b));
        let grid = PadGroupGrid::new(bbox, &group_boxes);

        debug!(
            "built {} {} plane: {} pads, {} cards, {} groups, {} grid cells",
            deid,
            plane,
            index.nof_pads(),
            index.cards.len(),
            groups.len(),
            grid.nof_cells()
        );

        Ok(Self {
            deid,
            plane,
            groups,
            group_types,
            pad_sizes,
            index,
            grid,
            bbox,
        })
    }

    /// The detection element this segmentation belongs to.
    #[inline]
    pub fn det_elem_id(&self) -> DeId {
        self.deid
    }

    /// True for the bending plane.
    #[inline]
    pub fn is_bending(&self) -> bool {
        self.plane.is_bending()
    }

    /// The cathode plane this segmentation describes.
    #[inline]
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Total number of pads.
    #[inline]
    pub fn nof_pads(&self) -> usize {
        self.index.nof_pads()
    }

    /// Number of front-end cards.
    #[inline]
    pub fn nof_cards(&self) -> usize {
        self.index.cards.len()
    }

    /// Card id at the given dense card index, or `None` out of range.
    /// Card indices enumerate the cards in ascending card-id order.
    #[inline]
    pub fn card_id(&self, index: usize) -> Option<CardId> {
        self.index.cards.get(index).copied()
    }

    /// The plane bounding box (union of all group boxes).
    #[inline]
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Whether `pad` is a valid pad id of this segmentation. The per-pad
    /// accessors require a valid id; this is the checking entry point for
    /// ids from untrusted sources.
    #[inline]
    pub fn is_valid(&self, pad: PadId) -> bool {
        pad.index() < self.nof_pads()
    }

    /// Iterates all pad ids, in id order. The iterator is lazy, finite and
    /// restartable (`pads()` can be called any number of times).
    pub fn pads(&self) -> impl Iterator<Item = PadId> {
        (0..self.nof_pads() as u32).map(PadId)
    }

    /// The pads of one card, in ascending id order, or `None` for an
    /// unknown card.
    pub fn card_pads(&self, card: CardId) -> Option<&[PadId]> {
        let ci = *self.index.card_lookup.get(&card)?;
        Some(&self.index.card_pads[ci])
    }

    /// Finds the pad containing the position (x, y).
    ///
    /// Grid cells are a coarse pre-filter, not an exact partition: in the
    /// degenerate near-zero-width region where group boxes overlap, several
    /// groups can claim the position, and the tie goes to the pad whose
    /// center is closest (squared Euclidean distance, no tolerance).
    pub fn find_pad_by_position(&self, x: f64, y: f64) -> Option<PadId> {
        let mut candidates: Vec<PadId> = Vec::with_capacity(2);
        for &gi in self.grid.groups_at(x, y) {
            let gi = usize::from(gi);
            let pg = &self.groups[gi];
            let pgt = &self.group_types[pg.group_type];
            let size = self.pad_sizes[pg.pad_size];
            let lx = x - pg.x;
            let ly = y - pg.y;
            if lx < 0.0 || ly < 0.0 {
                continue;
            }
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let ix = (lx / size.width) as usize;
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let iy = (ly / size.height) as usize;
            let Some(fast) = pgt.fast_index(ix, iy) else {
                continue;
            };
            // resolve within the group's contiguous pad range
            let first = self.index.group_first_pad[gi] as usize;
            for pad in first..first + pgt.nof_pads() {
                if usize::from(self.index.pad_fast[pad]) == fast {
                    candidates.push(PadId(pad as u32));
                    break;
                }
            }
        }
        if candidates.len() > 1 {
            let mut best = candidates[0];
            let mut dmin = f64::MAX;
            for &pad in &candidates {
                let dx = x - self.pad_position_x(pad);
                let dy = y - self.pad_position_y(pad);
                let d = dx * dx + dy * dy;
                if d < dmin {
                    best = pad;
                    dmin = d;
                }
            }
            return Some(best);
        }
        candidates.first().copied()
    }

    /// Finds the pad read out by (card, channel), or `None` if the card is
    /// unknown or no pad of that card uses the channel.
    pub fn find_pad_by_fee(&self, card: CardId, channel: Channel) -> Option<PadId> {
        self.card_pads(card)?
            .iter()
            .copied()
            .find(|&pad| self.pad_channel(pad) == channel)
    }

    #[inline]
    fn pad_group(&self, pad: PadId) -> &PadGroup {
        &self.groups[usize::from(self.index.pad_group[pad.index()])]
    }

    #[inline]
    fn pad_group_type(&self, pad: PadId) -> &PadGroupType {
        &self.group_types[self.pad_group(pad).group_type]
    }

    #[inline]
    fn pad_fast(&self, pad: PadId) -> usize {
        usize::from(self.index.pad_fast[pad.index()])
    }

    /// X position of the pad center.
    ///
    /// # Panics
    /// Panics if `pad` is not a pad of this segmentation, as do all per-pad
    /// accessors below.
    pub fn pad_position_x(&self, pad: PadId) -> f64 {
        let pg = self.pad_group(pad);
        let pgt = self.pad_group_type(pad);
        let ix = pgt.ix(self.pad_fast(pad));
        pg.x + (ix as f64 + 0.5) * self.pad_sizes[pg.pad_size].width
    }

    /// Y position of the pad center.
    pub fn pad_position_y(&self, pad: PadId) -> f64 {
        let pg = self.pad_group(pad);
        let pgt = self.pad_group_type(pad);
        let iy = pgt.iy(self.pad_fast(pad));
        pg.y + (iy as f64 + 0.5) * self.pad_sizes[pg.pad_size].height
    }

    /// Width of the pad.
    pub fn pad_size_x(&self, pad: PadId) -> f64 {
        self.pad_sizes[self.pad_group(pad).pad_size].width
    }

    /// Height of the pad.
    pub fn pad_size_y(&self, pad: PadId) -> f64 {
        self.pad_sizes[self.pad_group(pad).pad_size].height
    }

    /// Front-end card reading the pad out.
    pub fn pad_card(&self, pad: PadId) -> CardId {
        self.pad_group(pad).card
    }

    /// Channel the pad is wired to on its card.
    pub fn pad_channel(&self, pad: PadId) -> Channel {
        self.pad_group_type(pad).channel(self.pad_fast(pad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(nx: usize, ny: usize, first_channel: u8) -> PadGroupType {
        let slots: Vec<Option<Channel>> = (0..nx * ny)
            .map(|c| Some(Channel(first_channel + c as u8)))
            .collect();
        PadGroupType::new(nx, ny, &slots).unwrap()
    }

    /// Two overlapping 4x4 groups: the second shifted right by 1.75, so a
    /// 0.25-wide band is claimed by both.
    fn overlapping_plane() -> CathodeSegmentation {
        let desc = PlaneDescription {
            pad_sizes: vec![PadSize::new(0.5, 0.5)],
            group_types: vec![full(4, 4, 0)],
            groups: vec![
                PadGroup {
                    x: 0.0,
                    y: 0.0,
                    group_type: 0,
                    pad_size: 0,
                    card: CardId(1),
                },
                PadGroup {
                    x: 1.75,
                    y: 0.0,
                    group_type: 0,
                    pad_size: 0,
                    card: CardId(2),
                },
            ],
        };
        CathodeSegmentation::build(DeId(1), Plane::Bending, desc).unwrap()
    }

    #[test]
    fn test_overlap_resolves_to_nearest_center() {
        let seg = overlapping_plane();
        // (1.9, 0.25) sits in both groups: group 0 pad center (1.75, 0.25)
        // at distance 0.15, group 1 pad center (2.0, 0.25) at 0.10
        let pad = seg.find_pad_by_position(1.9, 0.25).unwrap();
        assert_eq!(seg.pad_card(pad), CardId(2));
        // nudged left of the midpoint, group 0 wins
        let pad = seg.find_pad_by_position(1.85, 0.25).unwrap();
        assert_eq!(seg.pad_card(pad), CardId(1));
    }

    #[test]
    fn test_build_rejects_malformed_tables() {
        let desc = PlaneDescription {
            pad_sizes: vec![PadSize::new(-0.5, 0.5)],
            group_types: vec![full(2, 2, 0)],
            groups: vec![PadGroup {
                x: 0.0,
                y: 0.0,
                group_type: 0,
                pad_size: 0,
                card: CardId(1),
            }],
        };
        assert!(CathodeSegmentation::build(DeId(1), Plane::Bending, desc).is_err());
    }

    #[test]
    fn test_group_box_spans_the_tiling() {
        let types = vec![full(4, 2, 0)];
        let sizes = vec![PadSize::new(1.0, 0.5)];
        let pg = PadGroup {
            x: -1.0,
            y: 2.0,
            group_type: 0,
            pad_size: 0,
            card: CardId(1),
        };
        let b = group_box(&pg, &types, &sizes);
        assert!((b.xmax() - 3.0).abs() < f64::EPSILON);
        assert!((b.ymax() - 3.0).abs() < f64::EPSILON);
    }
}
