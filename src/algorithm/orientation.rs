//! Orientation of a matched tile against the reference it extends
//!
//! The transform for a match is looked up in a fixed table keyed by the
//! reference side, the matched side and whether the matched descriptor was
//! read in reversed order. Borders are walked counterclockwise, so glued
//! edges read in opposite directions: a reversed match only needs a rotation,
//! while a native match also needs a mirror flip.

use crate::analysis::descriptors::{EdgeDescriptor, Side, SideIndex};
use image::{RgbImage, imageops};
use ndarray::ArrayView1;

/// Mirror axis applied after rotation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flip {
    /// No mirroring
    #[default]
    None,
    /// Mirror left/right (`x -> width - 1 - x`)
    Horizontal,
    /// Mirror top/bottom (`y -> height - 1 - y`)
    Vertical,
}

/// Quarter-turn rotation followed by an optional mirror flip
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transform {
    /// Clockwise quarter turns in `0..4`
    pub rotation_steps: u8,
    /// Mirror applied after the rotation
    pub flip: Flip,
}

impl Transform {
    /// No rotation and no flip
    pub const IDENTITY: Self = Self::rotation(0);

    /// Rotation-only transform
    pub const fn rotation(rotation_steps: u8) -> Self {
        Self {
            rotation_steps: rotation_steps % 4,
            flip: Flip::None,
        }
    }

    /// Rotation followed by a flip
    pub const fn rotation_then_flip(rotation_steps: u8, flip: Flip) -> Self {
        Self {
            rotation_steps: rotation_steps % 4,
            flip,
        }
    }

    /// Whether applying the transform leaves pixels unchanged
    pub const fn is_identity(&self) -> bool {
        self.rotation_steps == 0 && matches!(self.flip, Flip::None)
    }

    /// Rotation in degrees, clockwise
    pub const fn degrees(&self) -> u32 {
        self.rotation_steps as u32 * 90
    }

    /// Rotate clockwise, then flip
    pub fn apply(&self, pixels: &RgbImage) -> RgbImage {
        let rotated = match self.rotation_steps {
            1 => imageops::rotate90(pixels),
            2 => imageops::rotate180(pixels),
            3 => imageops::rotate270(pixels),
            _ => pixels.clone(),
        };
        match self.flip {
            Flip::None => rotated,
            Flip::Horizontal => imageops::flip_horizontal(&rotated),
            Flip::Vertical => imageops::flip_vertical(&rotated),
        }
    }
}

const fn turn(steps: u8) -> Transform {
    Transform::rotation(steps)
}

const fn mirror(steps: u8, flip: Flip) -> Transform {
    Transform::rotation_then_flip(steps, flip)
}

const H: Flip = Flip::Horizontal;
const V: Flip = Flip::Vertical;

/// Transform lookup indexed `[reference side][matched side % 4][reversed]`
pub static ORIENTATION_TABLE: [[[Transform; 2]; 4]; 4] = [
    // reference left
    [
        [mirror(0, H), turn(2)],
        [mirror(1, V), turn(1)],
        [mirror(0, V), turn(0)],
        [mirror(1, H), turn(3)],
    ],
    // reference top
    [
        [mirror(1, V), turn(3)],
        [mirror(0, V), turn(2)],
        [mirror(1, H), turn(1)],
        [mirror(0, H), turn(0)],
    ],
    // reference right
    [
        [mirror(0, V), turn(0)],
        [mirror(1, H), turn(3)],
        [mirror(0, H), turn(2)],
        [mirror(1, V), turn(1)],
    ],
    // reference bottom
    [
        [mirror(1, H), turn(1)],
        [mirror(0, H), turn(0)],
        [mirror(1, V), turn(3)],
        [mirror(0, V), turn(2)],
    ],
];

/// Transform for an explicit matched side and reading direction
pub fn resolve_with(reference: Side, matched: Side, reversed: bool) -> Transform {
    ORIENTATION_TABLE
        .get(reference.index())
        .and_then(|row| row.get(matched.index()))
        .and_then(|entry| entry.get(usize::from(reversed)))
        .copied()
        .unwrap_or_default()
}

/// Transform gluing descriptor `matched` of a candidate onto side `reference`
pub fn resolve(reference: Side, matched: SideIndex) -> Transform {
    resolve_with(reference, matched.side(), matched.is_reversed())
}

/// Whether `candidate` glues onto `reference` when read backwards
///
/// Compares the raw frames forwards and backwards on every `step`-th sample.
/// Used when reduced descriptors cannot tell the two directions apart.
pub fn reading_reversed(
    reference: &EdgeDescriptor,
    candidate: &EdgeDescriptor,
    step: usize,
) -> bool {
    let expected = reference.samples();
    let actual = candidate.samples();
    let length = expected.nrows().min(actual.nrows());

    let mut forward = 0u64;
    let mut backward = 0u64;
    for i in (0..length).step_by(step.max(1)) {
        forward += channel_distance(expected.row(i), actual.row(i));
        backward += channel_distance(expected.row(i), actual.row(length - 1 - i));
    }
    forward > backward
}

fn channel_distance(a: ArrayView1<'_, u16>, b: ArrayView1<'_, u16>) -> u64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum()
}
