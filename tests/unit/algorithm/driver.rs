//! Tests for driver seeding, stepping, state transitions and outcomes

#[cfg(test)]
mod tests {
    use edgestitch::AlgorithmError;
    use edgestitch::algorithm::driver::{
        AssemblyConfig, AssemblyDriver, Completion, DriverState, Outcome, Step,
    };
    use edgestitch::algorithm::orientation::Transform;
    use edgestitch::analysis::descriptors::{Side, SideIndex};
    use edgestitch::analysis::reduction::ScoreReduction;
    use edgestitch::spatial::pool::Pool;
    use edgestitch::spatial::tiles::{Tile, TileExtractor, TileSize};
    use image::{Rgb, RgbImage};

    /// Red and blue tiles whose shared border carries the same gradient
    fn two_tile_source() -> RgbImage {
        RgbImage::from_fn(120, 60, |x, y| {
            if x == 59 || x == 60 {
                Rgb([(y * 4) as u8, 100, 50])
            } else if x < 60 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    fn two_tiles() -> Vec<Tile> {
        TileExtractor::extract(&two_tile_source(), TileSize::square(60)).unwrap()
    }

    // Tests two tiles sharing a border assemble into a complete strip
    // Verified by returning the native left descriptor from the scan
    #[test]
    fn test_two_tile_assembly() {
        let mut driver =
            AssemblyDriver::from_tiles(two_tiles(), ScoreReduction::Raw, AssemblyConfig::default())
                .unwrap();
        assert_eq!(driver.state(), DriverState::Seeded);
        assert_eq!(driver.assembly().len(), 1);

        let Step::Placed {
            tile_id,
            side,
            score,
            transform,
        } = driver.step()
        else {
            panic!("expected a placement");
        };
        assert_eq!(tile_id, 1);
        assert_eq!(side, SideIndex::reversed(Side::Left));
        assert!(score.value().abs() < f64::EPSILON);
        assert_eq!(transform, Transform::IDENTITY);
        assert_eq!(driver.state(), DriverState::Extending);

        let outcome = driver.run();
        assert_eq!(
            outcome,
            Outcome {
                placed: 2,
                remaining: 0,
                completion: Completion::Complete
            }
        );
        assert_eq!(driver.state(), DriverState::Done(Completion::Complete));
        assert_eq!(driver.assembly().tile_ids(), vec![0, 1]);
        assert_eq!(
            driver.assembly().transforms(),
            vec![Transform::IDENTITY, Transform::IDENTITY]
        );
    }

    // Tests stepping after the end repeats the outcome without changes
    // Verified by re-entering the search from the done state
    #[test]
    fn test_step_after_done_is_stable() {
        let mut driver =
            AssemblyDriver::from_tiles(two_tiles(), ScoreReduction::Raw, AssemblyConfig::default())
                .unwrap();
        let outcome = driver.run();
        assert_eq!(driver.step(), Step::Finished(outcome));
        assert_eq!(driver.run(), outcome);
        assert_eq!(driver.assembly().len(), 2);
    }

    // Tests the seed is removed from the pool and placed untransformed
    // Verified by seeding from the last pool position
    #[test]
    fn test_seed_tile_selection() {
        let config = AssemblyConfig {
            seed_tile: 1,
            reference_side: Side::Left,
            ..AssemblyConfig::default()
        };
        let driver = AssemblyDriver::from_tiles(two_tiles(), ScoreReduction::Raw, config).unwrap();

        assert_eq!(driver.assembly().tile_ids(), vec![1]);
        assert_eq!(driver.pool().len(), 1);
        assert_eq!(driver.assembly().growth(), Side::Left);
        assert!(driver.assembly().tiles()[0].matched().is_none());
        assert_eq!(driver.config().seed_tile, 1);
    }

    // Tests growing left from the blue tile finds the red tile
    // Verified by ignoring the reference side in the table lookup
    #[test]
    fn test_growth_to_the_left() {
        let config = AssemblyConfig {
            seed_tile: 1,
            reference_side: Side::Left,
            ..AssemblyConfig::default()
        };
        let mut driver =
            AssemblyDriver::from_tiles(two_tiles(), ScoreReduction::Raw, config).unwrap();
        let outcome = driver.run();

        assert!(outcome.is_complete());
        assert_eq!(driver.assembly().tile_ids(), vec![1, 0]);
        let placed = &driver.assembly().tiles()[1];
        assert_eq!(placed.tile().pixels(), two_tiles()[0].pixels());
        assert_eq!(
            placed.matched().map(|(side, _)| side),
            Some(SideIndex::reversed(Side::Right))
        );
    }

    // Tests an unmatched pool ends the assembly as a partial outcome
    // Verified by reporting exhaustion as an error from step
    #[test]
    fn test_partial_outcome() {
        let red = Tile::new(0, (0, 0), RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])));
        let blue = Tile::new(1, (0, 1), RgbImage::from_pixel(8, 8, Rgb([0, 0, 255])));
        let mut driver = AssemblyDriver::from_tiles(
            vec![red, blue],
            ScoreReduction::Raw,
            AssemblyConfig::default(),
        )
        .unwrap();

        let outcome = driver.run();
        assert_eq!(outcome.completion, Completion::Partial);
        assert_eq!((outcome.placed, outcome.remaining), (1, 1));
        assert!(matches!(
            outcome.into_result(),
            Err(AlgorithmError::NoMatchFound {
                placed: 1,
                remaining: 1
            })
        ));
    }

    // Tests a single tile is complete immediately
    // Verified by starting in the extending state
    #[test]
    fn test_single_tile_pool() {
        let tile = Tile::new(0, (0, 0), RgbImage::new(4, 4));
        let mut driver =
            AssemblyDriver::from_tiles(vec![tile], ScoreReduction::Raw, AssemblyConfig::default())
                .unwrap();

        let Step::Finished(outcome) = driver.step() else {
            panic!("a single tile has nothing to extend");
        };
        assert!(outcome.is_complete());
        assert_eq!(outcome.into_result().unwrap().placed, 1);
        assert_eq!(driver.into_assembly().len(), 1);
    }

    // Tests a seed with a rotated copy left in the pool is flagged as ambiguous
    // Verified by looking up twins by unrotated side order
    #[test]
    fn test_rotated_twin_is_reported() {
        let pixels = RgbImage::from_fn(6, 6, |x, y| Rgb([x as u8 * 20, y as u8 * 20, 10]));
        let seed = Tile::new(0, (0, 0), pixels.clone());
        let twin = Tile::new(5, (1, 1), Transform::rotation(1).apply(&pixels));
        let other = Tile::new(2, (0, 2), RgbImage::from_pixel(6, 6, Rgb([0, 90, 0])));

        let driver = AssemblyDriver::from_tiles(
            vec![seed, other, twin],
            ScoreReduction::Raw,
            AssemblyConfig::default(),
        )
        .unwrap();
        assert_eq!(driver.assembly().tiles()[0].rotated_twin(), Some(5));
        assert_eq!(driver.assembly().ambiguous_count(), 1);

        let driver =
            AssemblyDriver::from_tiles(two_tiles(), ScoreReduction::Raw, AssemblyConfig::default())
                .unwrap();
        assert!(driver.assembly().tiles()[0].rotated_twin().is_none());
        assert_eq!(driver.assembly().ambiguous_count(), 0);
    }

    // Tests configuration errors are reported before seeding
    // Verified by clamping the seed position into the pool
    #[test]
    fn test_invalid_configuration() {
        let empty = Pool::build(Vec::new(), ScoreReduction::Raw).unwrap();
        assert!(matches!(
            AssemblyDriver::new(empty, AssemblyConfig::default()),
            Err(AlgorithmError::EmptyPool)
        ));

        let config = AssemblyConfig {
            seed_tile: 2,
            ..AssemblyConfig::default()
        };
        let pool = Pool::build(two_tiles(), ScoreReduction::Raw).unwrap();
        assert!(config.validate(&pool).is_err());
        assert!(AssemblyDriver::new(pool, config).is_err());
    }

    // Tests reduced descriptors still resolve the reading direction
    // Verified by always taking the native index in reduced mode
    #[test]
    fn test_reduced_mode_resolves_direction() {
        let mut driver = AssemblyDriver::from_tiles(
            two_tiles(),
            ScoreReduction::symmetric_pairs(),
            AssemblyConfig::default(),
        )
        .unwrap();

        let Step::Placed {
            side, transform, ..
        } = driver.step()
        else {
            panic!("expected a placement");
        };
        assert_eq!(side, SideIndex::reversed(Side::Left));
        assert_eq!(transform, Transform::IDENTITY);
    }
}
