//! Command-line interface for batch reassembly of tiled PNG files

use crate::algorithm::driver::{AssemblyConfig, AssemblyDriver, Outcome, Step};
use crate::algorithm::metric::{ComparisonMode, Metric};
use crate::analysis::descriptors::Side;
use crate::analysis::reduction::ScoreReduction;
use crate::io::configuration::{
    ANIMATION_SUFFIX, DEFAULT_LOG_LEVEL, DEFAULT_SEED_TILE, DEFAULT_TILE_SIZE, GIF_FRAME_DELAY_MS,
    OUTPUT_SUFFIX, THRESHOLD,
};
use crate::io::error::{Result, io_error};
use crate::io::image::{export_assembly_as_png, export_tiles, load_rgb};
use crate::io::progress::ProgressManager;
use crate::io::visualization::AssemblyCapture;
use crate::spatial::pool::Pool;
use crate::spatial::scramble::scramble;
use crate::spatial::tiles::{TileExtractor, TileSize};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "edgestitch")]
#[command(
    author,
    version,
    about = "Reassemble images cut into scrambled square tiles by matching tile borders"
)]
/// Command-line arguments for the reassembly tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Side length of the square tiles in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Side of the last placed tile that new tiles are glued onto
    #[arg(short, long, default_value_t = Side::Right)]
    pub side: Side,

    /// Position of the tile that seeds the assembly
    #[arg(short = 'S', long, default_value_t = DEFAULT_SEED_TILE)]
    pub seed_tile: usize,

    /// How per-channel differences are combined (multiplicative or additive)
    #[arg(short, long, default_value = "multiplicative")]
    pub mode: ComparisonMode,

    /// Largest per-channel difference between matching border pixels
    #[arg(short = 'T', long, default_value_t = THRESHOLD)]
    pub tolerance: u16,

    /// Accept any channel difference
    #[arg(long, conflicts_with = "tolerance")]
    pub no_tolerance: bool,

    /// Compare symmetric pair sums instead of raw border pixels
    #[arg(short, long)]
    pub reduce: bool,

    /// Scan candidates on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Shuffle and reorient tiles with this seed before reassembly
    #[arg(long, value_name = "SEED")]
    pub scramble: Option<u64>,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Write every oriented tile into this directory
    #[arg(long, value_name = "DIR")]
    pub tiles_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Tile dimensions requested on the command line
    pub const fn tile_dimensions(&self) -> TileSize {
        TileSize::square(self.tile_size)
    }

    /// Border comparison selected by mode and tolerance flags
    pub const fn metric(&self) -> Metric {
        let tolerance = if self.no_tolerance {
            None
        } else {
            Some(self.tolerance)
        };
        Metric::new(self.mode, tolerance)
    }

    /// Descriptor reduction selected by `--reduce`
    pub fn reduction(&self) -> ScoreReduction {
        if self.reduce {
            ScoreReduction::symmetric_pairs()
        } else {
            ScoreReduction::Raw
        }
    }

    /// Driver configuration built from the arguments
    pub const fn assembly_config(&self) -> AssemblyConfig {
        AssemblyConfig {
            metric: self.metric(),
            reference_side: self.side,
            seed_tile: self.seed_tile,
            parallel: self.parallel,
        }
    }

    /// Log filter parsed from `--log-level`, falling back to warnings
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    file_count: usize,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            file_count: 0,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;
        self.file_count = files.len();

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Reassemble one image and write its outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image cannot be loaded or cut into tiles
    /// - The pool or driver cannot be built
    /// - Any output cannot be written
    pub fn process_file(&mut self, input_path: &Path, index: usize) -> Result<Outcome> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let source = load_rgb(input_path)?;
        let mut tiles = TileExtractor::extract(&source, self.cli.tile_dimensions())?;
        if let Some(seed) = self.cli.scramble {
            tiles = scramble(tiles, seed);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, tiles.len());
        }

        let pool = Pool::build(tiles, self.cli.reduction())?;
        let mut driver = AssemblyDriver::new(pool, self.cli.assembly_config())?;

        let mut capture = self.cli.visualize.then(|| AssemblyCapture::new(self.cli.side));
        Self::capture_last(capture.as_mut(), &driver);

        let outcome = loop {
            match driver.step() {
                Step::Placed { .. } => {
                    Self::capture_last(capture.as_mut(), &driver);
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.update_placed(index, driver.assembly().len());
                    }
                }
                Step::Finished(outcome) => break outcome,
            }
        };

        export_assembly_as_png(driver.assembly(), &output_path)?;

        if let Some(capture) = capture {
            capture.export_gif(&Self::get_visualization_path(input_path), GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref tiles_dir) = self.cli.tiles_dir {
            let directory = if self.file_count > 1 {
                tiles_dir.join(input_path.file_stem().unwrap_or_default())
            } else {
                tiles_dir.clone()
            };
            export_tiles(driver.assembly(), &directory)?;
        }

        log::info!(
            "{}: placed {} of {} tiles in {:.2?}",
            input_path.display(),
            outcome.placed,
            outcome.placed + outcome.remaining,
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, outcome.is_complete());
        }

        Ok(outcome)
    }

    fn capture_last(capture: Option<&mut AssemblyCapture>, driver: &AssemblyDriver) {
        if let (Some(capture), Some(last)) = (capture, driver.assembly().tiles().last()) {
            capture.record_placement(last.tile().pixels());
        }
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a PNG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !Self::is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn is_generated_output(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
    }

    /// Stitched output path: `<stem>_result.<ext>` next to the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    /// Animation output path: `<stem>_assembly.gif` next to the input
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}{}.gif", stem.to_string_lossy(), ANIMATION_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
