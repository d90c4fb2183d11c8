//! Edge descriptors read along tile borders
//!
//! Every border is walked counterclockwise around the tile, so two tiles glued
//! along an edge read their shared pixels in opposite orders. Each tile gets
//! eight descriptors: the four native borders (indices 0..4) followed by their
//! sample-reversed variants (indices 4..8).

use crate::analysis::reduction::ScoreReduction;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::tiles::Tile;
use image::{Rgb, RgbImage};
use ndarray::{Array2, ArrayView1, ArrayView2, s};
use std::fmt;
use std::str::FromStr;

/// Number of channels per descriptor sample
pub const CHANNELS: usize = 3;

/// Physical tile side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Column 0, read top to bottom
    Left = 0,
    /// Row 0, read right to left
    Top = 1,
    /// Last column, read bottom to top
    Right = 2,
    /// Last row, read left to right
    Bottom = 3,
}

impl Side {
    /// Sides in index order
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    /// Index in `0..4`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Side for an index, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Left,
            1 => Self::Top,
            2 => Self::Right,
            _ => Self::Bottom,
        }
    }

    /// Side facing away from this one
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Parse a side name (`left`, `top`, `right`, `bottom`)
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a side
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            _ => Err(invalid_parameter(
                "side",
                &name,
                &"expected one of left, top, right, bottom",
            )),
        }
    }
}

impl FromStr for Side {
    type Err = AlgorithmError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(name)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// One of the eight oriented descriptors of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SideIndex(u8);

impl SideIndex {
    /// Descriptors per tile
    pub const COUNT: usize = 8;

    /// Native-direction descriptor of `side`
    pub const fn native(side: Side) -> Self {
        Self(side as u8)
    }

    /// Reversed-direction descriptor of `side`
    pub const fn reversed(side: Side) -> Self {
        Self(side as u8 + 4)
    }

    /// Descriptor index from a raw value
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not in `0..8`
    pub fn new(index: usize) -> Result<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&value| usize::from(value) < Self::COUNT)
            .map(Self)
            .ok_or_else(|| invalid_parameter("side_index", &index, &"must be in 0..8"))
    }

    /// Raw index in `0..8`
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Physical side (`index mod 4`)
    pub const fn side(self) -> Side {
        Side::from_index(self.index())
    }

    /// Whether this is a reversed-direction descriptor
    pub const fn is_reversed(self) -> bool {
        self.0 >= 4
    }

    /// All eight indices in scan order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

/// Ordered border samples, one RGB triple per row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDescriptor {
    samples: Array2<u16>,
}

impl EdgeDescriptor {
    /// Descriptor holding raw pixel values in walk order
    pub fn from_pixels(pixels: &[Rgb<u8>]) -> Self {
        let mut samples = Array2::zeros((pixels.len(), CHANNELS));
        for (mut row, pixel) in samples.rows_mut().into_iter().zip(pixels) {
            for (dst, &src) in row.iter_mut().zip(pixel.0.iter()) {
                *dst = u16::from(src);
            }
        }
        Self { samples }
    }

    /// Descriptor from a `(samples, 3)` array
    ///
    /// # Errors
    ///
    /// Returns an error if the array does not have exactly three channel columns
    pub fn from_samples(samples: Array2<u16>) -> Result<Self> {
        if samples.ncols() != CHANNELS {
            return Err(invalid_parameter(
                "samples",
                &format!("{:?}", samples.dim()),
                &"descriptor samples need three channel columns",
            ));
        }
        Ok(Self { samples })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    /// Whether the descriptor has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.nrows() == 0
    }

    /// Sample matrix (rows are samples, columns are channels)
    pub fn samples(&self) -> ArrayView2<'_, u16> {
        self.samples.view()
    }

    /// Values of one channel along the border
    pub fn channel(&self, channel: usize) -> Option<ArrayView1<'_, u16>> {
        (channel < CHANNELS).then(|| self.samples.column(channel))
    }

    /// Same samples in inverted order
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            samples: self.samples.slice(s![..;-1, ..]).to_owned(),
        }
    }

    /// Flattened samples, used for hashing and ordering keys
    pub fn to_flat_vec(&self) -> Vec<u16> {
        self.samples.iter().copied().collect()
    }
}

/// Per-side storage for one descriptor each
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideDescriptors {
    left: EdgeDescriptor,
    top: EdgeDescriptor,
    right: EdgeDescriptor,
    bottom: EdgeDescriptor,
}

impl SideDescriptors {
    /// Descriptor of `side`
    pub const fn get(&self, side: Side) -> &EdgeDescriptor {
        match side {
            Side::Left => &self.left,
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
        }
    }

    fn try_map<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&EdgeDescriptor) -> Result<EdgeDescriptor>,
    {
        Ok(Self {
            left: f(&self.left)?,
            top: f(&self.top)?,
            right: f(&self.right)?,
            bottom: f(&self.bottom)?,
        })
    }

    fn map<F>(&self, f: F) -> Self
    where
        F: Fn(&EdgeDescriptor) -> EdgeDescriptor,
    {
        Self {
            left: f(&self.left),
            top: f(&self.top),
            right: f(&self.right),
            bottom: f(&self.bottom),
        }
    }
}

/// The eight oriented descriptors of a tile plus its raw border frames
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileDescriptorSet {
    native: SideDescriptors,
    reversed: SideDescriptors,
    frames: SideDescriptors,
}

impl TileDescriptorSet {
    /// Walk the tile borders and build all descriptors
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A border walk does not yield exactly `min(width, height)` samples
    /// - The reduction is not applicable to the border length
    pub fn build(tile: &Tile, reduction: &ScoreReduction) -> Result<Self> {
        let frames = border_frames(tile.pixels())?;
        let native = frames.try_map(|frame| reduction.reduce(frame))?;
        // Reversed descriptors reduce the backwards-read frame
        let reversed = frames
            .map(EdgeDescriptor::reversed)
            .try_map(|frame| reduction.reduce(frame))?;
        Ok(Self {
            native,
            reversed,
            frames,
        })
    }

    /// Descriptor at an oriented index
    pub const fn descriptor(&self, index: SideIndex) -> &EdgeDescriptor {
        if index.is_reversed() {
            self.reversed.get(index.side())
        } else {
            self.native.get(index.side())
        }
    }

    /// Native-direction descriptor of `side`
    pub const fn native(&self, side: Side) -> &EdgeDescriptor {
        self.native.get(side)
    }

    /// Raw (unreduced) border pixels of `side` in native order
    pub const fn frame(&self, side: Side) -> &EdgeDescriptor {
        self.frames.get(side)
    }

    /// All eight descriptors in index order
    pub fn iter(&self) -> impl Iterator<Item = (SideIndex, &EdgeDescriptor)> {
        SideIndex::all().map(move |index| (index, self.descriptor(index)))
    }
}

/// Raw native border frames of a pixel buffer
///
/// # Errors
///
/// Returns an error if a walked border does not have `min(width, height)` samples
pub fn border_frames(pixels: &RgbImage) -> Result<SideDescriptors> {
    let width = i64::from(pixels.width());
    let height = i64::from(pixels.height());
    let expected = pixels.width().min(pixels.height()) as usize;

    let walk = |side: Side, begin: (i64, i64), end: (i64, i64)| {
        let slice = walk_border(pixels, begin, end);
        if slice.len() == expected {
            Ok(EdgeDescriptor::from_pixels(&slice))
        } else {
            Err(AlgorithmError::MalformedSlice {
                side: side.index(),
                expected,
                actual: slice.len(),
            })
        }
    };

    Ok(SideDescriptors {
        left: walk(Side::Left, (0, 0), (1, height))?,
        top: walk(Side::Top, (width - 1, 0), (-1, 1))?,
        right: walk(Side::Right, (width - 1, height - 1), (width - 2, -1))?,
        bottom: walk(Side::Bottom, (0, height - 1), (width, height - 2))?,
    })
}

/// Collect pixels over the half-open column and row ranges `begin..end`
///
/// Each axis steps by +1 when `begin < end` and by -1 otherwise; columns are
/// the outer loop. Coordinates outside the buffer are skipped.
pub fn walk_border(pixels: &RgbImage, begin: (i64, i64), end: (i64, i64)) -> Vec<Rgb<u8>> {
    let mut slice = Vec::new();
    for column in span(begin.0, end.0) {
        for row in span(begin.1, end.1) {
            let (Ok(x), Ok(y)) = (u32::try_from(column), u32::try_from(row)) else {
                continue;
            };
            if let Some(pixel) = pixels.get_pixel_checked(x, y) {
                slice.push(*pixel);
            }
        }
    }
    slice
}

fn span(begin: i64, end: i64) -> Box<dyn Iterator<Item = i64>> {
    if begin < end {
        Box::new(begin..end)
    } else {
        Box::new((end + 1..=begin).rev())
    }
}
