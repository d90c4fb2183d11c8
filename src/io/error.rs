//! Error types for tile extraction, descriptor building and file handling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all reassembly operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source image is not an exact multiple of the tile size
    InvalidDimensions {
        /// Source image size (width, height)
        source_size: (u32, u32),
        /// Requested tile size (width, height)
        tile_size: (u32, u32),
    },

    /// A walked border produced the wrong number of samples
    ///
    /// Indicates a boundary walk that does not match the tile geometry,
    /// for example a non-square tile buffer.
    MalformedSlice {
        /// Side index that was being walked
        side: usize,
        /// Expected sample count (the tile side length)
        expected: usize,
        /// Sample count actually produced
        actual: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Assembly was requested on a pool without tiles
    EmptyPool,

    /// The nearest-match search found no candidate below the `BIG` sentinel
    ///
    /// The driver reports this outcome as data; this variant exists for callers
    /// that want to treat a partial assembly as a failure.
    NoMatchFound {
        /// Tiles placed before the search was exhausted (seed included)
        placed: usize,
        /// Tiles left unplaced in the pool
        remaining: usize,
    },

    /// Failed to save an output image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidDimensions {
                source_size,
                tile_size,
            } => {
                write!(
                    f,
                    "Image size {}x{} is not a multiple of tile size {}x{}",
                    source_size.0, source_size.1, tile_size.0, tile_size.1
                )
            }
            Self::MalformedSlice {
                side,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Border walk for side {side} produced {actual} samples (expected {expected})"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyPool => write!(f, "Cannot assemble an empty tile pool"),
            Self::NoMatchFound { placed, remaining } => {
                write!(
                    f,
                    "No acceptable match after placing {placed} tiles ({remaining} left unplaced)"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reassembly results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable input or output path
pub fn io_error(msg: &str) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
