//! Working set of unplaced tiles
//!
//! Descriptor sets are computed once when the pool is built and travel with
//! their tile until it is removed. Removal keeps the remaining order stable,
//! which the nearest-match tie-break depends on.

use crate::analysis::descriptors::TileDescriptorSet;
use crate::analysis::reduction::ScoreReduction;
use crate::io::configuration::MAX_TILE_SIDE;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::keys::{RotatedKeyMap, side_sequence};
use crate::spatial::tiles::{Tile, TileId, TileSize};

/// A tile together with its descriptor set
#[derive(Clone, Debug)]
pub struct PoolEntry {
    tile: Tile,
    descriptors: TileDescriptorSet,
}

impl PoolEntry {
    /// The unplaced tile
    pub const fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Descriptors computed when the pool was built
    pub const fn descriptors(&self) -> &TileDescriptorSet {
        &self.descriptors
    }

    /// Split into tile and descriptor set
    pub fn into_parts(self) -> (Tile, TileDescriptorSet) {
        (self.tile, self.descriptors)
    }
}

/// Ordered candidate tiles not yet placed in the assembly
#[derive(Clone, Debug)]
pub struct Pool {
    entries: Vec<PoolEntry>,
    reduction: ScoreReduction,
    tile_size: Option<TileSize>,
    rotation_index: RotatedKeyMap<Vec<u16>, Vec<TileId>>,
}

impl Pool {
    /// Build descriptor sets for every tile
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Tiles have different sizes or exceed `MAX_TILE_SIDE`
    /// - The reduction does not fit the tile side length
    /// - A border walk yields the wrong number of samples
    pub fn build(tiles: Vec<Tile>, reduction: ScoreReduction) -> Result<Self> {
        let tile_size = tiles.first().map(Tile::size);
        if let Some(size) = tile_size {
            if size.side() > MAX_TILE_SIDE {
                return Err(invalid_parameter(
                    "tile_size",
                    &size.side(),
                    &format!("tile side must not exceed {MAX_TILE_SIDE}"),
                ));
            }
            reduction.validate(size.side() as usize)?;
        }

        let mut entries = Vec::with_capacity(tiles.len());
        let mut rotation_index: RotatedKeyMap<Vec<u16>, Vec<TileId>> = RotatedKeyMap::new();
        for tile in tiles {
            if Some(tile.size()) != tile_size {
                return Err(invalid_parameter(
                    "tiles",
                    &tile.id(),
                    &"all tiles in a pool must share one size",
                ));
            }
            let descriptors = TileDescriptorSet::build(&tile, &reduction)?;
            rotation_index
                .entry_or_default(&side_sequence(&descriptors))
                .push(tile.id());
            entries.push(PoolEntry { tile, descriptors });
        }

        let pool = Self {
            entries,
            reduction,
            tile_size,
            rotation_index,
        };
        log::info!(
            "Pool built: {} tiles, {} identical to another up to rotation",
            pool.len(),
            pool.duplicate_count()
        );
        Ok(pool)
    }

    /// Number of unplaced tiles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every tile has been placed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unplaced tiles in scan order
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// Reduction used for every descriptor in the pool
    pub const fn reduction(&self) -> &ScoreReduction {
        &self.reduction
    }

    /// Size shared by all tiles, `None` for a pool built empty
    pub const fn tile_size(&self) -> Option<TileSize> {
        self.tile_size
    }

    /// Remove and return the entry at `position`, keeping the order of the rest
    pub fn remove(&mut self, position: usize) -> Option<PoolEntry> {
        if position >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(position);

        let key = side_sequence(&entry.descriptors);
        let now_empty = self.rotation_index.get_mut(&key).is_some_and(|ids| {
            ids.retain(|&id| id != entry.tile.id());
            ids.is_empty()
        });
        if now_empty {
            self.rotation_index.remove(&key);
        }

        Some(entry)
    }

    /// Position of the first pool tile equal to `descriptors` up to rotation
    pub fn find_rotation_of(&self, descriptors: &TileDescriptorSet) -> Option<usize> {
        let ids = self.rotation_index.get(&side_sequence(descriptors))?;
        self.entries
            .iter()
            .position(|entry| ids.contains(&entry.tile.id()))
    }

    /// Tiles that share their border content, up to rotation, with an earlier tile
    pub fn duplicate_count(&self) -> usize {
        self.rotation_index
            .values()
            .map(|ids| ids.len().saturating_sub(1))
            .sum()
    }
}
