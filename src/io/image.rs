//! Source image loading and PNG export of assembled tiles

use crate::algorithm::driver::Assembly;
use crate::io::error::{AlgorithmError, Result, invalid_parameter, io_error};
use crate::spatial::layout::StripLayout;
use crate::spatial::tiles::TileSize;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Load an image file as 8-bit RGB
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Save an image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(img: &RgbImage, output_path: &Path) -> Result<()> {
    create_parent_dir(output_path)?;
    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Stitch an assembly into one strip image
///
/// # Errors
///
/// Returns an error if the assembly is empty or holds tiles of different sizes
pub fn stitch_assembly(assembly: &Assembly) -> Result<RgbImage> {
    let images = assembly.images();
    let first = images
        .first()
        .ok_or_else(|| invalid_parameter("assembly", &0, &"no tiles have been placed"))?;
    let tile_size = TileSize {
        width: first.width(),
        height: first.height(),
    };
    StripLayout::new(assembly.growth(), images.len(), tile_size).stitch(&images)
}

/// Export the stitched strip as a PNG image
///
/// # Errors
///
/// Returns an error if stitching or saving fails
pub fn export_assembly_as_png(assembly: &Assembly, output_path: &Path) -> Result<()> {
    let strip = stitch_assembly(assembly)?;
    save_png(&strip, output_path)
}

/// Write every oriented tile as `tile_NNN.png` in placement order
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a tile cannot be saved
pub fn export_tiles(assembly: &Assembly, directory: &Path) -> Result<Vec<PathBuf>> {
    if directory.exists() && !directory.is_dir() {
        return Err(io_error("Tile output path exists and is not a directory"));
    }
    std::fs::create_dir_all(directory).map_err(|e| AlgorithmError::FileSystem {
        path: directory.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let mut written = Vec::with_capacity(assembly.len());
    for (index, image) in assembly.images().into_iter().enumerate() {
        let path = directory.join(format!("tile_{index:03}.png"));
        save_png(image, &path)?;
        written.push(path);
    }
    Ok(written)
}

fn create_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }
    Ok(())
}
