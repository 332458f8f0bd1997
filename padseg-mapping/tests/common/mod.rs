//! Shared synthetic fixtures for the integration tests.
//!
//! The bending plane exercises every structural feature at once: two pad
//! sizes, a group type with a cutout, a pad-density discontinuity between
//! neighbouring groups, and three cards. Layout (world coordinates, cm):
//!
//! ```text
//! y=6 +--------+--------+
//!     |  g4    |        |
//! y=4 +--------+  g3    |
//!     | g2  ## |        |
//! y=2 +--------+--------+
//!     |  g0    |  g1    |
//! y=0 +--------+--------+
//!     x=0      x=2      x=4
//! ```
//!
//! `##` is the cutout of g2's type (no pads for x in [1,2], y in [3,4]);
//! g3 uses 1.0 cm wide pads against the 0.5 cm pads everywhere else.

#![allow(dead_code)]

use padseg_mapping::{
    CardId, CathodeSegmentation, Channel, DeId, PadGroup, PadGroupType, PadSize, Plane,
    PlaneDescription,
};

/// A fully populated nx x ny type with channels counted row-major from
/// `first_channel`.
pub fn full_type(nx: usize, ny: usize, first_channel: u8) -> PadGroupType {
    let slots: Vec<Option<Channel>> = (0..nx * ny)
        .map(|c| Some(Channel(first_channel + u8::try_from(c).unwrap())))
        .collect();
    PadGroupType::new(nx, ny, &slots).unwrap()
}

/// A 4x4 type with the top-right 2x2 corner absent (12 pads), channels
/// 16..=27 on the present slots.
pub fn cutout_type() -> PadGroupType {
    let mut slots = Vec::with_capacity(16);
    let mut channel = 16u8;
    for iy in 0..4 {
        for ix in 0..4 {
            if ix >= 2 && iy >= 2 {
                slots.push(None);
            } else {
                slots.push(Some(Channel(channel)));
                channel += 1;
            }
        }
    }
    PadGroupType::new(4, 4, &slots).unwrap()
}

fn group(x: f64, y: f64, group_type: usize, pad_size: usize, card: u16) -> PadGroup {
    PadGroup {
        x,
        y,
        group_type,
        pad_size,
        card: CardId(card),
    }
}

/// The bending-plane fixture: 76 pads on 3 cards.
///
/// Pad id ranges: g0 0..16, g1 16..32, g2 32..44, g3 44..60, g4 60..76.
pub fn bending_plane() -> PlaneDescription {
    PlaneDescription {
        pad_sizes: vec![PadSize::new(0.5, 0.5), PadSize::new(1.0, 0.5)],
        group_types: vec![
            full_type(4, 4, 0),  // 0: channels 0..=15
            full_type(4, 4, 16), // 1: channels 16..=31
            cutout_type(),       // 2: 12 pads, channels 16..=27
            full_type(2, 8, 32), // 3: channels 32..=47
        ],
        groups: vec![
            group(0.0, 0.0, 0, 0, 10), // g0
            group(2.0, 0.0, 1, 0, 10), // g1
            group(0.0, 2.0, 2, 0, 11), // g2
            group(2.0, 2.0, 3, 1, 11), // g3, coarse 1.0 cm pads
            group(0.0, 4.0, 0, 0, 12), // g4
        ],
    }
}

/// The non-bending-plane fixture: one 8x8 group of 0.5 x 0.75 pads over
/// the same [0,4] x [0,6] footprint, 64 pads on card 20.
pub fn non_bending_plane() -> PlaneDescription {
    PlaneDescription {
        pad_sizes: vec![PadSize::new(0.5, 0.75)],
        group_types: vec![full_type(8, 8, 0)],
        groups: vec![group(0.0, 0.0, 0, 0, 20)],
    }
}

/// The bending fixture, built.
pub fn bending_segmentation() -> CathodeSegmentation {
    CathodeSegmentation::build(DeId(1), Plane::Bending, bending_plane()).unwrap()
}

/// The non-bending fixture, built.
pub fn non_bending_segmentation() -> CathodeSegmentation {
    CathodeSegmentation::build(DeId(1), Plane::NonBending, non_bending_plane()).unwrap()
}

/// A large regular plane: `n x n` groups of full 8x8 types, one card per
/// group, 0.5 cm square pads.
pub fn big_plane(n: usize) -> PlaneDescription {
    let mut groups = Vec::with_capacity(n * n);
    for gy in 0..n {
        for gx in 0..n {
            groups.push(group(
                4.0 * gx as f64,
                4.0 * gy as f64,
                0,
                0,
                u16::try_from(gy * n + gx).unwrap(),
            ));
        }
    }
    PlaneDescription {
        pad_sizes: vec![PadSize::new(0.5, 0.5)],
        group_types: vec![full_type(8, 8, 0)],
        groups,
    }
}
