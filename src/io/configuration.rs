//! Reassembly constants and runtime configuration defaults

/// Side length of the square tiles the source image is cut into
pub const DEFAULT_TILE_SIZE: u32 = 60;

/// Largest tile side accepted by validation
///
/// Keeps every achievable similarity score below the `BIG` sentinel.
pub const MAX_TILE_SIDE: u32 = 1024;

/// Maximum per-channel difference between matching border pixels
pub const THRESHOLD: u16 = 25;

// BIG is THRESHOLD raised to these powers, in each comparison mode's units
/// Exponent of the multiplicative-mode sentinel (log space)
pub const BIG_EXPONENT: u32 = 10_000;
/// Exponent of the additive-mode sentinel
pub const ADDITIVE_BIG_EXPONENT: i32 = 10;

/// Sample offsets used by the symmetric pair reduction
pub const DEFAULT_PAIR_OFFSETS: [usize; 10] = [0, 9, 10, 29, 20, 14, 5, 25, 1, 2];

/// Stride used when comparing raw frames to pick a reading direction
pub const DIRECTION_SAMPLE_STEP: usize = 10;

/// Pool position of the tile that seeds the assembly
pub const DEFAULT_SEED_TILE: usize = 0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to stitched output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to assembly animation filenames
pub const ANIMATION_SUFFIX: &str = "_assembly";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
/// Default `env_logger` filter when none is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";
