//! Dense pad-identifier construction and the derived index tables.
//!
//! One pass over the pad groups, in input order, assigns every present slot
//! a contiguous pad id. The side tables keep the arena-and-index layout:
//! pads are never materialized as objects, only as rows across a few
//! compact columns.

use std::collections::{BTreeSet, HashMap};

use padseg_core::{CardId, PadGroup, PadGroupType, PadId};

/// The tables derived from the raw pad-group description.
///
/// Invariants (established by [`IndexTables::build`], relied on by the
/// queries): pad ids are contiguous in `0..nof_pads`, all pads of a group
/// occupy a contiguous id range starting at `group_first_pad[g]`, and
/// `cards` is sorted ascending with `card_pads[i]` listing the pads of
/// `cards[i]` in ascending id order.
#[derive(Debug)]
pub(crate) struct IndexTables {
    /// First pad id of each group.
    pub group_first_pad: Vec<u32>,
    /// Owning group index per pad.
    pub pad_group: Vec<u16>,
    /// Fast index within the owning group's type, per pad.
    pub pad_fast: Vec<u16>,
    /// Card ids, deduplicated and sorted ascending.
    pub cards: Vec<CardId>,
    /// Card id to dense card index.
    pub card_lookup: HashMap<CardId, usize>,
    /// Pads of each card, by dense card index.
    pub card_pads: Vec<Vec<PadId>>,
}

impl IndexTables {
    /// Builds the tables. `groups` must already be validated against
    /// `types` (every `group_type` reference in range).
    pub fn build(groups: &[PadGroup], types: &[PadGroupType]) -> Self {
        let mut group_first_pad = Vec::with_capacity(groups.len());
        let mut pad_group = Vec::new();
        let mut pad_fast = Vec::new();
        for (gi, pg) in groups.iter().enumerate() {
            group_first_pad.push(pad_group.len() as u32);
            let pgt = &types[pg.group_type];
            for iy in 0..pgt.ny() {
                for ix in 0..pgt.nx() {
                    if let Some(fast) = pgt.fast_index(ix, iy) {
                        pad_group.push(gi as u16);
                        pad_fast.push(fast as u16);
                    }
                }
            }
        }

        // sort the card ids so they always come out ordered the same way
        let unique: BTreeSet<CardId> = groups.iter().map(|pg| pg.card).collect();
        let cards: Vec<CardId> = unique.into_iter().collect();
        let card_lookup: HashMap<CardId, usize> =
            cards.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        let mut card_pads = vec![Vec::new(); cards.len()];
        for (gi, pg) in groups.iter().enumerate() {
            let ci = card_lookup[&pg.card];
            let first = group_first_pad[gi];
            let nof = types[pg.group_type].nof_pads() as u32;
            card_pads[ci].extend((first..first + nof).map(PadId));
        }

        Self {
            group_first_pad,
            pad_group,
            pad_fast,
            cards,
            card_lookup,
            card_pads,
        }
    }

    /// Total number of pads.
    #[inline]
    pub fn nof_pads(&self) -> usize {
        self.pad_group.len()
    }
}
