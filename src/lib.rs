//! Reassembly of images cut into square tiles of unknown order and orientation
//!
//! Tile borders are read into edge descriptors, compared with a tolerant
//! difference metric, and the best match is glued onto a growing strip after
//! being rotated and mirrored into place.

#![deny(unsafe_code)]

/// Candidate search, orientation resolution and the assembly driver
pub mod algorithm;
/// Edge descriptor extraction and score reduction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Tiles, candidate pool, strip layout and scrambling
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
