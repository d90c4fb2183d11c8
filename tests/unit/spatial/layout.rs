//! Tests for strip cell positions and stitching onto one canvas

#[cfg(test)]
mod tests {
    use edgestitch::analysis::descriptors::Side;
    use edgestitch::spatial::layout::StripLayout;
    use edgestitch::spatial::tiles::TileSize;
    use image::{Rgb, RgbImage};

    // Tests each growth side lays tiles out in its direction from the seed
    // Verified by ignoring the sign of the step
    #[test]
    fn test_cells_follow_growth() {
        let size = TileSize::square(2);
        assert_eq!(
            StripLayout::new(Side::Right, 3, size).cells(),
            &[(0, 0), (1, 0), (2, 0)]
        );
        assert_eq!(
            StripLayout::new(Side::Left, 3, size).cells(),
            &[(2, 0), (1, 0), (0, 0)]
        );
        assert_eq!(
            StripLayout::new(Side::Top, 2, size).cells(),
            &[(0, 1), (0, 0)]
        );
        assert_eq!(
            StripLayout::new(Side::Bottom, 2, size).cells(),
            &[(0, 0), (0, 1)]
        );
    }

    // Tests the canvas spans the bounding box of all cells
    // Verified by sizing the canvas from the tile count only
    #[test]
    fn test_canvas_size() {
        let size = TileSize {
            width: 3,
            height: 2,
        };
        assert_eq!(StripLayout::new(Side::Left, 4, size).canvas_size(), (12, 2));
        assert_eq!(StripLayout::new(Side::Bottom, 4, size).canvas_size(), (3, 8));
        assert_eq!(StripLayout::new(Side::Right, 0, size).canvas_size(), (0, 0));
    }

    // Tests stitched tiles land in their cells
    // Verified by swapping the column and row offsets
    #[test]
    fn test_stitch_places_tiles() {
        let first = RgbImage::from_pixel(2, 2, Rgb([10, 0, 0]));
        let second = RgbImage::from_pixel(2, 2, Rgb([20, 0, 0]));
        let layout = StripLayout::new(Side::Left, 2, TileSize::square(2));

        let canvas = layout.stitch(&[&first, &second]).unwrap();
        assert_eq!(canvas.dimensions(), (4, 2));
        assert_eq!(canvas.get_pixel(0, 1), &Rgb([20, 0, 0]));
        assert_eq!(canvas.get_pixel(3, 0), &Rgb([10, 0, 0]));
    }

    // Tests mismatched counts and sizes are rejected
    // Verified by zipping images without checking counts
    #[test]
    fn test_stitch_rejects_mismatch() {
        let tile = RgbImage::new(2, 2);
        let odd = RgbImage::new(3, 2);
        let layout = StripLayout::new(Side::Right, 2, TileSize::square(2));

        assert!(layout.stitch(&[&tile]).is_err());
        assert!(layout.stitch(&[&tile, &odd]).is_err());
    }
}
