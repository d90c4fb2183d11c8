//! Spatial data structures for tiles and their arrangement
//!
//! This module contains spatial-related functionality including:
//! - Tile extraction from a source grid
//! - The pool of unplaced tiles and its rotation-invariant index
//! - Strip layout and stitching of placed tiles
//! - Seeded scrambling of tiles into a puzzle

/// Rotation-invariant keys for cyclic side sequences
pub mod keys;
/// Strip layout and stitching of placed tiles
pub mod layout;
/// Working set of unplaced tiles with their descriptors
pub mod pool;
/// Seeded shuffling and reorientation of tiles
pub mod scramble;
/// Tile data structures and grid extraction
pub mod tiles;

pub use pool::Pool;
pub use tiles::{Tile, TileExtractor, TileSize};
