//! Nearest-match scan over every pool tile and every oriented side
//!
//! The winner is the first strict minimum in scan order (pool position, then
//! side index 0..8). The parallel scan computes one minimum per tile and
//! reduces them in pool order, so both scans pick the same candidate.

use crate::algorithm::metric::{Metric, Score};
use crate::analysis::descriptors::{EdgeDescriptor, SideIndex};
use crate::spatial::pool::{Pool, PoolEntry};
use crate::spatial::tiles::TileId;
use rayon::prelude::*;

/// A scored pairing of a pool tile side with the reference descriptor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Position of the tile in the pool at scan time
    pub position: usize,
    /// Identifier of the matched tile
    pub tile_id: TileId,
    /// Oriented descriptor that matched
    pub side: SideIndex,
    /// Difference score against the reference
    pub score: Score,
}

/// Best side of one tile, if any side beats the sentinel
pub fn best_side(
    entry: &PoolEntry,
    reference: &EdgeDescriptor,
    metric: &Metric,
) -> Option<(SideIndex, Score)> {
    let mut best: Option<(SideIndex, Score)> = None;
    let mut min_difference = metric.big();
    for (side, descriptor) in entry.descriptors().iter() {
        let difference = metric.compare(reference, descriptor);
        if difference < min_difference {
            min_difference = difference;
            best = Some((side, difference));
        }
    }
    best
}

/// Lowest-scoring tile side in the pool, `None` when nothing beats the sentinel
pub fn nearest_match(
    pool: &Pool,
    reference: &EdgeDescriptor,
    metric: &Metric,
    parallel: bool,
) -> Option<Candidate> {
    let per_tile: Vec<Option<Candidate>> = if parallel {
        pool.entries()
            .par_iter()
            .enumerate()
            .map(|(position, entry)| tile_candidate(position, entry, reference, metric))
            .collect()
    } else {
        pool.entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| tile_candidate(position, entry, reference, metric))
            .collect()
    };

    first_minimum(per_tile.into_iter().flatten())
}

/// Every acceptable tile side ordered by score, ties kept in scan order
pub fn ranked_candidates(
    pool: &Pool,
    reference: &EdgeDescriptor,
    metric: &Metric,
    limit: usize,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = pool
        .entries()
        .iter()
        .enumerate()
        .flat_map(|(position, entry)| {
            entry
                .descriptors()
                .iter()
                .map(move |(side, descriptor)| Candidate {
                    position,
                    tile_id: entry.tile().id(),
                    side,
                    score: metric.compare(reference, descriptor),
                })
        })
        .filter(|candidate| metric.accepts(candidate.score))
        .collect();

    candidates.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(limit);
    candidates
}

fn tile_candidate(
    position: usize,
    entry: &PoolEntry,
    reference: &EdgeDescriptor,
    metric: &Metric,
) -> Option<Candidate> {
    best_side(entry, reference, metric).map(|(side, score)| Candidate {
        position,
        tile_id: entry.tile().id(),
        side,
        score,
    })
}

fn first_minimum(candidates: impl Iterator<Item = Candidate>) -> Option<Candidate> {
    candidates.fold(None, |best: Option<Candidate>, candidate| match best {
        Some(current) if current.score <= candidate.score => Some(current),
        _ => Some(candidate),
    })
}
