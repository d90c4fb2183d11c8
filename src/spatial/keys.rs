//! Rotation-invariant keys for cyclic sequences
//!
//! A tile rotated by a quarter turn shifts its four borders cyclically. Keys
//! are canonicalized to their lexicographically smallest rotation before every
//! insert, lookup and removal, so all rotations of a sequence share one entry.

use crate::analysis::descriptors::{Side, TileDescriptorSet};
use std::collections::HashMap;
use std::hash::Hash;

/// Lexicographically smallest cyclic rotation of `items`
pub fn canonical_rotation<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    (0..items.len().max(1))
        .map(|shift| rotate_left(items, shift))
        .min()
        .unwrap_or_default()
}

fn rotate_left<T: Clone>(items: &[T], shift: usize) -> Vec<T> {
    items
        .iter()
        .cycle()
        .skip(shift)
        .take(items.len())
        .cloned()
        .collect()
}

/// Map whose keys are compared up to cyclic rotation
#[derive(Clone, Debug)]
pub struct RotatedKeyMap<K, V> {
    entries: HashMap<Vec<K>, V>,
}

impl<K, V> Default for RotatedKeyMap<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Ord + Clone + Hash, V> RotatedKeyMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under any rotation of `key`
    pub fn get(&self, key: &[K]) -> Option<&V> {
        self.entries.get(&canonical_rotation(key))
    }

    /// Mutable value stored under any rotation of `key`
    pub fn get_mut(&mut self, key: &[K]) -> Option<&mut V> {
        self.entries.get_mut(&canonical_rotation(key))
    }

    /// Value stored under any rotation of `key`, inserting a default first if absent
    pub fn entry_or_default(&mut self, key: &[K]) -> &mut V
    where
        V: Default,
    {
        self.entries.entry(canonical_rotation(key)).or_default()
    }

    /// Remove the entry shared by all rotations of `key`
    pub fn remove(&mut self, key: &[K]) -> Option<V> {
        self.entries.remove(&canonical_rotation(key))
    }

    /// Stored values in arbitrary order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}

/// The four raw border frames of a tile in side order, as a cyclic key
pub fn side_sequence(set: &TileDescriptorSet) -> Vec<Vec<u16>> {
    Side::ALL
        .iter()
        .map(|&side| set.frame(side).to_flat_vec())
        .collect()
}
