//! Strip layout of placed tiles and stitching into one canvas

use crate::analysis::descriptors::Side;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::tiles::TileSize;
use image::{RgbImage, imageops};

/// Grid cell offsets of consecutive tiles for each growth side
const fn step(growth: Side) -> (i64, i64) {
    match growth {
        Side::Left => (-1, 0),
        Side::Top => (0, -1),
        Side::Right => (1, 0),
        Side::Bottom => (0, 1),
    }
}

/// Cell positions of a strip, normalized so the top-left cell is (0, 0)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripLayout {
    cells: Vec<(u32, u32)>,
    columns: u32,
    rows: u32,
    tile_size: TileSize,
}

impl StripLayout {
    /// Layout for `count` tiles glued one after another onto `growth`
    pub fn new(growth: Side, count: usize, tile_size: TileSize) -> Self {
        let (dx, dy) = step(growth);
        let raw: Vec<(i64, i64)> = (0..count as i64).map(|i| (i * dx, i * dy)).collect();

        let min_x = raw.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = raw.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let cells: Vec<(u32, u32)> = raw
            .iter()
            .map(|&(x, y)| ((x - min_x) as u32, (y - min_y) as u32))
            .collect();

        let columns = cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let rows = cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);

        Self {
            cells,
            columns,
            rows,
            tile_size,
        }
    }

    /// (column, row) of each tile in placement order
    pub fn cells(&self) -> &[(u32, u32)] {
        &self.cells
    }

    /// Canvas size in pixels (width, height)
    pub const fn canvas_size(&self) -> (u32, u32) {
        (
            self.columns * self.tile_size.width,
            self.rows * self.tile_size.height,
        )
    }

    /// Compose tiles into one image following the layout
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The number of images differs from the layout
    /// - An image does not have the layout tile size
    pub fn stitch(&self, images: &[&RgbImage]) -> Result<RgbImage> {
        if images.len() != self.cells.len() {
            return Err(invalid_parameter(
                "images",
                &images.len(),
                &format!("layout holds {} tiles", self.cells.len()),
            ));
        }

        let (width, height) = self.canvas_size();
        let mut canvas = RgbImage::new(width, height);
        for (&(column, row), image) in self.cells.iter().zip(images) {
            if image.dimensions() != (self.tile_size.width, self.tile_size.height) {
                return Err(invalid_parameter(
                    "images",
                    &format!("{}x{}", image.width(), image.height()),
                    &format!(
                        "expected {}x{} tiles",
                        self.tile_size.width, self.tile_size.height
                    ),
                ));
            }
            imageops::replace(
                &mut canvas,
                *image,
                i64::from(column * self.tile_size.width),
                i64::from(row * self.tile_size.height),
            );
        }
        Ok(canvas)
    }
}
