//! Border analysis turning tiles into comparable edge descriptors

/// Border walks and the eight oriented descriptors of a tile
pub mod descriptors;
/// Optional reduction of border frames into compact summaries
pub mod reduction;
