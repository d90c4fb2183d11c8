//! Frame capture and GIF generation for assembly visualization

use crate::analysis::descriptors::Side;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::layout::StripLayout;
use crate::spatial::tiles::TileSize;
use image::{DynamicImage, Frame, Rgba, RgbImage, RgbaImage, imageops};
use std::path::Path;

/// Canvas color of cells that have no tile yet
const EMPTY_COLOR: [u8; 4] = [128, 128, 128, 255];

/// Delay multiplier for the last frame
const FINAL_FRAME_HOLD: u32 = 5;

/// Captures oriented tiles in placement order
///
/// Every recorded tile becomes one animation frame showing the strip grown
/// so far on a canvas sized for the whole strip.
pub struct AssemblyCapture {
    growth: Side,
    placements: Vec<RgbImage>,
}

impl AssemblyCapture {
    /// Capture for a strip growing towards `growth`
    pub const fn new(growth: Side) -> Self {
        Self {
            growth,
            placements: Vec::new(),
        }
    }

    /// Record the next placed tile
    pub fn record_placement(&mut self, tile: &RgbImage) {
        self.placements.push(tile.clone());
    }

    /// Number of recorded tiles
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Render one frame per placement
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tiles were recorded
    /// - Recorded tiles differ in size
    pub fn render_frames(&self, frame_delay_ms: u32) -> Result<Vec<Frame>> {
        let first = self
            .placements
            .first()
            .ok_or_else(|| invalid_parameter("placements", &0, &"no tiles captured"))?;
        let tile_size = TileSize {
            width: first.width(),
            height: first.height(),
        };
        let layout = StripLayout::new(self.growth, self.placements.len(), tile_size);
        let (width, height) = layout.canvas_size();

        let mut canvas = RgbaImage::from_pixel(width, height, Rgba(EMPTY_COLOR));
        let mut frames = Vec::with_capacity(self.placements.len() + 1);
        for (&(column, row), tile) in layout.cells().iter().zip(&self.placements) {
            if tile.dimensions() != (tile_size.width, tile_size.height) {
                return Err(invalid_parameter(
                    "placements",
                    &format!("{}x{}", tile.width(), tile.height()),
                    &"captured tiles must share one size",
                ));
            }
            let rgba = DynamicImage::ImageRgb8(tile.clone()).to_rgba8();
            imageops::replace(
                &mut canvas,
                &rgba,
                i64::from(column * tile_size.width),
                i64::from(row * tile_size.height),
            );
            frames.push(Frame::from_parts(
                canvas.clone(),
                0,
                0,
                image::Delay::from_numer_denom_ms(frame_delay_ms, 1),
            ));
        }

        // Hold the finished strip on screen
        frames.push(Frame::from_parts(
            canvas,
            0,
            0,
            image::Delay::from_numer_denom_ms(frame_delay_ms * FINAL_FRAME_HOLD, 1),
        ));
        Ok(frames)
    }

    /// Export the captured frames as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tiles were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let frames = self.render_frames(frame_delay_ms)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
