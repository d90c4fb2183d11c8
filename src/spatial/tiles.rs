//! Tile data structures and grid extraction
//!
//! Cuts a source image into a regular grid of square tiles. Once extracted,
//! a tile keeps its origin only for reporting; the assembly treats it as an
//! opaque piece.

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use image::{RgbImage, imageops};

/// Sequential identifier assigned at extraction time (row-major order)
pub type TileId = usize;

/// Tile dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSize {
    /// Tile width in pixels
    pub width: u32,
    /// Tile height in pixels
    pub height: u32,
}

impl TileSize {
    /// Square tile size with the given side length
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Border length shared by all four sides
    pub const fn side(&self) -> u32 {
        if self.width < self.height {
            self.width
        } else {
            self.height
        }
    }

    /// Whether width and height are equal
    pub const fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// A square piece of the source image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    origin: (u32, u32),
    pixels: RgbImage,
}

impl Tile {
    /// Wrap a pixel buffer as a tile
    ///
    /// `origin` is the (row, column) grid cell the tile was cut from.
    pub const fn new(id: TileId, origin: (u32, u32), pixels: RgbImage) -> Self {
        Self { id, origin, pixels }
    }

    /// Extraction-order identifier
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Grid cell (row, column) in the source image
    pub const fn origin(&self) -> (u32, u32) {
        self.origin
    }

    /// Tile pixel data
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Tile dimensions
    pub fn size(&self) -> TileSize {
        TileSize {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Same tile identity with replaced pixel data
    #[must_use]
    pub fn with_pixels(&self, pixels: RgbImage) -> Self {
        Self {
            id: self.id,
            origin: self.origin,
            pixels,
        }
    }

    /// Consume the tile and return its pixel buffer
    pub fn into_pixels(self) -> RgbImage {
        self.pixels
    }
}

/// Slices source images into fixed-size tiles
pub struct TileExtractor;

impl TileExtractor {
    /// Cut `source` into `tile_size` cells in row-major scan order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A tile dimension is zero or the tile is not square
    /// - The source is empty or not an exact multiple of the tile size
    pub fn extract(source: &RgbImage, tile_size: TileSize) -> Result<Vec<Tile>> {
        if tile_size.width == 0 || tile_size.height == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &format!("{}x{}", tile_size.width, tile_size.height),
                &"tile dimensions must be positive",
            ));
        }
        if !tile_size.is_square() {
            return Err(invalid_parameter(
                "tile_size",
                &format!("{}x{}", tile_size.width, tile_size.height),
                &"tiles must be square",
            ));
        }

        let (source_width, source_height) = source.dimensions();
        if source_width == 0
            || source_height == 0
            || source_width % tile_size.width != 0
            || source_height % tile_size.height != 0
        {
            return Err(AlgorithmError::InvalidDimensions {
                source_size: (source_width, source_height),
                tile_size: (tile_size.width, tile_size.height),
            });
        }

        let rows = source_height / tile_size.height;
        let cols = source_width / tile_size.width;
        let mut tiles = Vec::with_capacity((rows * cols) as usize);

        for row in 0..rows {
            for col in 0..cols {
                let pixels = imageops::crop_imm(
                    source,
                    col * tile_size.width,
                    row * tile_size.height,
                    tile_size.width,
                    tile_size.height,
                )
                .to_image();
                tiles.push(Tile::new(tiles.len(), (row, col), pixels));
            }
        }

        Ok(tiles)
    }
}
