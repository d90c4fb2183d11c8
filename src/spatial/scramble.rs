//! Seeded shuffling and reorientation of tiles into a puzzle

use crate::algorithm::orientation::{Flip, Transform};
use crate::spatial::tiles::Tile;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Uniformly random rotation and flip
pub fn random_transform<R: Rng>(rng: &mut R) -> Transform {
    let flip = match rng.random_range(0..3u8) {
        0 => Flip::None,
        1 => Flip::Horizontal,
        _ => Flip::Vertical,
    };
    Transform::rotation_then_flip(rng.random_range(0..4u8), flip)
}

/// Shuffle tiles and reorient all but the first one
///
/// The first tile keeps its place and orientation so that it can seed an
/// assembly. Tile ids and origins are preserved.
pub fn scramble(mut tiles: Vec<Tile>, seed: u64) -> Vec<Tile> {
    let mut rng = StdRng::seed_from_u64(seed);
    if let Some(rest) = tiles.get_mut(1..) {
        rest.shuffle(&mut rng);
        for tile in rest.iter_mut() {
            let transform = random_transform(&mut rng);
            *tile = tile.with_pixels(transform.apply(tile.pixels()));
        }
    }
    tiles
}
