//! Assembly driver growing a strip of oriented tiles
//!
//! The driver owns the candidate pool and the assembly. Seeding removes one
//! tile from the pool; every step then glues the best-matching pool tile onto
//! the reference side of the last placed tile, orients it and makes it the
//! new reference. Running out of acceptable matches ends the assembly early
//! and is reported as a partial outcome, not as an error.

use crate::algorithm::metric::{Metric, Score};
use crate::algorithm::orientation::{Transform, reading_reversed, resolve};
use crate::algorithm::search::{nearest_match, ranked_candidates};
use crate::analysis::descriptors::{EdgeDescriptor, Side, SideIndex, TileDescriptorSet};
use crate::analysis::reduction::ScoreReduction;
use crate::io::configuration::{DEFAULT_SEED_TILE, DIRECTION_SAMPLE_STEP};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::pool::Pool;
use crate::spatial::tiles::{Tile, TileId};
use image::RgbImage;

/// Runner-up candidates listed at trace level after each placement
const TRACE_CANDIDATES: usize = 5;

/// Parameters controlling seeding, matching and scanning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssemblyConfig {
    /// Comparison used for every candidate
    pub metric: Metric,
    /// Side of the placed tile that the strip grows from
    pub reference_side: Side,
    /// Pool position of the tile that seeds the assembly
    pub seed_tile: usize,
    /// Scan candidates on the rayon thread pool
    pub parallel: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            reference_side: Side::Right,
            seed_tile: DEFAULT_SEED_TILE,
            parallel: false,
        }
    }
}

impl AssemblyConfig {
    /// Check the configuration against a pool
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool is empty
    /// - The seed tile position is outside the pool
    pub fn validate(&self, pool: &Pool) -> Result<()> {
        if pool.is_empty() {
            return Err(AlgorithmError::EmptyPool);
        }
        if self.seed_tile >= pool.len() {
            return Err(invalid_parameter(
                "seed_tile",
                &self.seed_tile,
                &format!("pool holds {} tiles", pool.len()),
            ));
        }
        Ok(())
    }
}

/// How an assembly ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Every pool tile was placed
    Complete,
    /// No remaining tile beat the `BIG` sentinel
    Partial,
}

/// Driver lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Seed placed, no extension yet
    Seeded,
    /// At least one tile glued onto the seed
    Extending,
    /// Terminal state
    Done(Completion),
}

/// Summary of a finished assembly
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Tiles in the assembly, seed included
    pub placed: usize,
    /// Tiles left in the pool
    pub remaining: usize,
    /// Whether the pool was exhausted
    pub completion: Completion,
}

impl Outcome {
    /// Whether every tile was placed
    pub const fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Complete)
    }

    /// Treat a partial assembly as an error
    ///
    /// # Errors
    ///
    /// Returns `NoMatchFound` if the assembly stopped before the pool was empty
    pub fn into_result(self) -> Result<Self> {
        match self.completion {
            Completion::Complete => Ok(self),
            Completion::Partial => Err(AlgorithmError::NoMatchFound {
                placed: self.placed,
                remaining: self.remaining,
            }),
        }
    }
}

/// Result of one driver step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// A tile was glued onto the strip
    Placed {
        /// Identifier of the placed tile
        tile_id: TileId,
        /// Descriptor of the tile that matched
        side: SideIndex,
        /// Difference score of the match
        score: Score,
        /// Orientation applied to the tile
        transform: Transform,
    },
    /// The assembly is over
    Finished(Outcome),
}

/// A tile in the assembly, stored with its orientation applied
#[derive(Clone, Debug)]
pub struct PlacedTile {
    tile: Tile,
    transform: Transform,
    matched: Option<(SideIndex, Score)>,
    rotated_twin: Option<TileId>,
}

impl PlacedTile {
    /// Tile with oriented pixels; id and origin refer to the source grid
    pub const fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Orientation applied to the source tile
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    /// Matched descriptor and score, `None` for the seed
    pub const fn matched(&self) -> Option<(SideIndex, Score)> {
        self.matched
    }

    /// Unplaced tile with the same borders up to rotation, when one was left in the pool
    ///
    /// Such a twin would have matched the same neighbour, so the placement between
    /// the two is a guess.
    pub const fn rotated_twin(&self) -> Option<TileId> {
        self.rotated_twin
    }
}

/// Ordered strip of placed tiles
#[derive(Clone, Debug)]
pub struct Assembly {
    tiles: Vec<PlacedTile>,
    growth: Side,
}

impl Assembly {
    /// Empty assembly growing towards `growth`
    pub const fn new(growth: Side) -> Self {
        Self {
            tiles: Vec::new(),
            growth,
        }
    }

    /// Number of placed tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether nothing has been placed
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Placed tiles in placement order
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    /// Side each new tile is glued onto
    pub const fn growth(&self) -> Side {
        self.growth
    }

    /// Oriented pixel buffers in placement order
    pub fn images(&self) -> Vec<&RgbImage> {
        self.tiles.iter().map(|placed| placed.tile.pixels()).collect()
    }

    /// Transforms in placement order
    pub fn transforms(&self) -> Vec<Transform> {
        self.tiles.iter().map(|placed| placed.transform).collect()
    }

    /// Source tile ids in placement order
    pub fn tile_ids(&self) -> Vec<TileId> {
        self.tiles.iter().map(|placed| placed.tile.id()).collect()
    }

    /// Placements made while a rotated twin was still unplaced
    pub fn ambiguous_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|placed| placed.rotated_twin.is_some())
            .count()
    }

    fn push(&mut self, placed: PlacedTile) {
        self.tiles.push(placed);
    }
}

/// The descriptor new candidates are compared against
#[derive(Clone, Debug)]
struct Reference {
    descriptor: EdgeDescriptor,
    frame: EdgeDescriptor,
}

impl Reference {
    fn of_side(descriptors: &TileDescriptorSet, side: Side) -> Self {
        Self {
            descriptor: descriptors.native(side).clone(),
            frame: descriptors.frame(side).clone(),
        }
    }

    // The oriented tile's reference side shows the border opposite the glued
    // one, read backwards when the match needed a flip
    fn after_match(descriptors: &TileDescriptorSet, matched: SideIndex) -> Self {
        let opposite = matched.side().opposite();
        if matched.is_reversed() {
            Self::of_side(descriptors, opposite)
        } else {
            Self {
                descriptor: descriptors
                    .descriptor(SideIndex::reversed(opposite))
                    .clone(),
                frame: descriptors.frame(opposite).reversed(),
            }
        }
    }
}

/// State machine assembling a strip from a pool of tiles
pub struct AssemblyDriver {
    pool: Pool,
    assembly: Assembly,
    config: AssemblyConfig,
    state: DriverState,
    reference: Reference,
}

impl AssemblyDriver {
    /// Seed the assembly with the configured tile
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool is empty
    /// - The seed tile position is outside the pool
    pub fn new(mut pool: Pool, config: AssemblyConfig) -> Result<Self> {
        config.validate(&pool)?;
        let (seed, descriptors) = pool
            .remove(config.seed_tile)
            .ok_or(AlgorithmError::EmptyPool)?
            .into_parts();

        log::info!(
            "Seeded with tile {} at {:?}, growing {:?}, {} candidates",
            seed.id(),
            seed.origin(),
            config.reference_side,
            pool.len()
        );

        let reference = Reference::of_side(&descriptors, config.reference_side);
        let mut assembly = Assembly::new(config.reference_side);
        let rotated_twin = rotated_twin_in(&pool, &descriptors);
        assembly.push(PlacedTile {
            tile: seed,
            transform: Transform::IDENTITY,
            matched: None,
            rotated_twin,
        });

        Ok(Self {
            pool,
            assembly,
            config,
            state: DriverState::Seeded,
            reference,
        })
    }

    /// Extract descriptors for `tiles` and seed a driver in one call
    ///
    /// # Errors
    ///
    /// Returns an error if pool construction or seeding fails
    pub fn from_tiles(
        tiles: Vec<Tile>,
        reduction: ScoreReduction,
        config: AssemblyConfig,
    ) -> Result<Self> {
        Self::new(Pool::build(tiles, reduction)?, config)
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Tiles placed so far
    pub const fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    /// Tiles not yet placed
    pub const fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Active configuration
    pub const fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Consume the driver and return the assembly
    pub fn into_assembly(self) -> Assembly {
        self.assembly
    }

    /// Place one more tile, or report that the assembly is over
    ///
    /// Calling `step` after the assembly finished returns the same outcome again.
    pub fn step(&mut self) -> Step {
        if let DriverState::Done(completion) = self.state {
            return Step::Finished(self.outcome(completion));
        }
        if self.pool.is_empty() {
            return Step::Finished(self.finish(Completion::Complete));
        }

        let metric = self.config.metric;
        let Some(candidate) = nearest_match(
            &self.pool,
            &self.reference.descriptor,
            &metric,
            self.config.parallel,
        ) else {
            return Step::Finished(self.finish(Completion::Partial));
        };

        if log::log_enabled!(log::Level::Trace) {
            let runners_up = ranked_candidates(
                &self.pool,
                &self.reference.descriptor,
                &metric,
                TRACE_CANDIDATES,
            );
            for runner_up in runners_up {
                log::trace!(
                    "  candidate tile {} side {} score {}",
                    runner_up.tile_id,
                    runner_up.side.index(),
                    runner_up.score
                );
            }
        }

        let Some(entry) = self.pool.remove(candidate.position) else {
            return Step::Finished(self.finish(Completion::Partial));
        };
        let (tile, descriptors) = entry.into_parts();

        let matched = if self.pool.reduction().is_reduced() {
            let side = candidate.side.side();
            if reading_reversed(
                &self.reference.frame,
                descriptors.frame(side),
                DIRECTION_SAMPLE_STEP,
            ) {
                SideIndex::reversed(side)
            } else {
                SideIndex::native(side)
            }
        } else {
            candidate.side
        };

        let transform = resolve(self.config.reference_side, matched);
        log::debug!(
            "Placed tile {} from {:?}: side {} score {} rotate {} flip {:?}",
            tile.id(),
            tile.origin(),
            matched.index(),
            candidate.score,
            transform.degrees(),
            transform.flip
        );

        let rotated_twin = rotated_twin_in(&self.pool, &descriptors);
        if let Some(twin) = rotated_twin {
            log::debug!(
                "Tile {} and unplaced tile {} match up to rotation",
                tile.id(),
                twin
            );
        }

        self.reference = Reference::after_match(&descriptors, matched);
        let oriented = tile.with_pixels(transform.apply(tile.pixels()));
        self.assembly.push(PlacedTile {
            tile: oriented,
            transform,
            matched: Some((matched, candidate.score)),
            rotated_twin,
        });
        self.state = DriverState::Extending;

        Step::Placed {
            tile_id: tile.id(),
            side: matched,
            score: candidate.score,
            transform,
        }
    }

    /// Step until the assembly is over
    pub fn run(&mut self) -> Outcome {
        loop {
            if let Step::Finished(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn finish(&mut self, completion: Completion) -> Outcome {
        self.state = DriverState::Done(completion);
        let outcome = self.outcome(completion);
        let ambiguous = self.assembly.ambiguous_count();
        if ambiguous > 0 {
            log::info!("{ambiguous} placements had a rotated twin left in the pool");
        }
        match completion {
            Completion::Complete => {
                log::info!("Assembly complete: {} tiles placed", outcome.placed);
            }
            Completion::Partial => {
                log::warn!(
                    "No acceptable match left: {} tiles placed, {} unplaced",
                    outcome.placed,
                    outcome.remaining
                );
            }
        }
        outcome
    }

    fn outcome(&self, completion: Completion) -> Outcome {
        Outcome {
            placed: self.assembly.len(),
            remaining: self.pool.len(),
            completion,
        }
    }
}

fn rotated_twin_in(pool: &Pool, descriptors: &TileDescriptorSet) -> Option<TileId> {
    pool.find_rotation_of(descriptors)
        .and_then(|position| pool.entries().get(position))
        .map(|entry| entry.tile().id())
}
