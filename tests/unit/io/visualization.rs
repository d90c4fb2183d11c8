//! Tests for assembly frame rendering and GIF export

#[cfg(test)]
mod tests {
    use edgestitch::analysis::descriptors::Side;
    use edgestitch::io::visualization::AssemblyCapture;
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::TempDir;

    fn capture_of(count: u8, growth: Side) -> AssemblyCapture {
        let mut capture = AssemblyCapture::new(growth);
        for shade in 0..count {
            capture.record_placement(&RgbImage::from_pixel(4, 4, Rgb([shade * 50, 0, 0])));
        }
        capture
    }

    // Tests one frame per placement plus a held final frame
    // Verified by skipping the final hold frame
    #[test]
    fn test_frame_count() {
        let capture = capture_of(3, Side::Right);
        assert_eq!(capture.placement_count(), 3);
        assert_eq!(capture.render_frames(100).unwrap().len(), 4);
    }

    // Tests frames grow the strip one tile at a time on a fixed canvas
    // Verified by rendering every tile into the first frame
    #[test]
    fn test_frames_grow_strip() {
        let frames = capture_of(2, Side::Bottom).render_frames(100).unwrap();

        let first = frames[0].buffer();
        assert_eq!(first.dimensions(), (4, 8));
        assert_eq!(first.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(first.get_pixel(0, 5), &Rgba([128, 128, 128, 255]));

        let second = frames[1].buffer();
        assert_eq!(second.get_pixel(0, 5), &Rgba([50, 0, 0, 255]));
    }

    // Tests exporting without placements fails
    // Verified by rendering an empty canvas instead
    #[test]
    fn test_empty_capture_fails() {
        let dir = TempDir::new().unwrap();
        let capture = AssemblyCapture::new(Side::Right);
        assert!(capture.render_frames(100).is_err());
        assert!(capture.export_gif(&dir.path().join("empty.gif"), 100).is_err());
    }

    // Tests the animation is written as a GIF file
    // Verified by writing the file without encoding frames
    #[test]
    fn test_export_gif() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("puzzle_assembly.gif");

        capture_of(3, Side::Left).export_gif(&path, 100).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
    }
}
