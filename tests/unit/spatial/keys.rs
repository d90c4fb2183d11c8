//! Tests for rotation-invariant keys and the map built on them

#[cfg(test)]
mod tests {
    use edgestitch::algorithm::orientation::Transform;
    use edgestitch::analysis::descriptors::TileDescriptorSet;
    use edgestitch::analysis::reduction::ScoreReduction;
    use edgestitch::spatial::keys::{RotatedKeyMap, canonical_rotation, side_sequence};
    use edgestitch::spatial::tiles::Tile;
    use image::{Rgb, RgbImage};

    // Tests the canonical form is the smallest cyclic rotation
    // Verified by returning the sorted sequence instead
    #[test]
    fn test_canonical_rotation() {
        assert_eq!(canonical_rotation(&[3, 1, 2]), vec![1, 2, 3]);
        assert_eq!(canonical_rotation(&[2, 1, 2, 1]), vec![1, 2, 1, 2]);
        assert_eq!(canonical_rotation(&[2, 1, 1]), vec![1, 1, 2]);
        assert_eq!(canonical_rotation::<u8>(&[]), Vec::<u8>::new());
    }

    // Tests all rotations of a key address the same entry
    // Verified by hashing keys without canonicalizing
    #[test]
    fn test_map_ignores_rotation() {
        let mut map: RotatedKeyMap<char, i32> = RotatedKeyMap::new();
        *map.entry_or_default(&['a', 'b', 'c', 'd']) += 2;

        assert_eq!(map.get(&['c', 'd', 'a', 'b']), Some(&2));
        assert!(map.get(&['a', 'c', 'b', 'd']).is_none());

        *map.entry_or_default(&['b', 'c', 'd', 'a']) += 5;
        assert_eq!(map.get(&['a', 'b', 'c', 'd']), Some(&7));
        assert_eq!(map.values().count(), 1);

        if let Some(value) = map.get_mut(&['c', 'd', 'a', 'b']) {
            *value = 0;
        }
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0]);

        assert_eq!(map.remove(&['b', 'c', 'd', 'a']), Some(0));
        assert!(map.get(&['a', 'b', 'c', 'd']).is_none());
    }

    // Tests a quarter-turned tile yields a rotation of the same side sequence
    // Verified by reading one border of the rotated tile in the wrong direction
    #[test]
    fn test_side_sequence_rotates_with_tile() {
        let pixels = RgbImage::from_fn(5, 5, |x, y| Rgb([x as u8 * 30, y as u8 * 30, 0]));
        let sequence = |image: RgbImage| {
            let set = TileDescriptorSet::build(&Tile::new(0, (0, 0), image), &ScoreReduction::Raw)
                .unwrap();
            side_sequence(&set)
        };

        let original = sequence(pixels.clone());
        for steps in 1..4 {
            let turned = sequence(Transform::rotation(steps).apply(&pixels));
            assert_ne!(turned, original);
            assert_eq!(canonical_rotation(&turned), canonical_rotation(&original));
        }
    }
}
