//! Command-line interface: seed image in, collapsed image out

use crate::algorithm::executor::Wave;
use crate::io::configuration::{MAX_FIELD_BYTES, NONDETERMINISTIC_SEED};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_wave, load_pattern};
use crate::io::progress::CollapseProgress;
use crate::spatial::grid::Field;
use crate::spatial::tiles::TileExtractor;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "collapsegrid")]
#[command(
    author,
    version,
    about = "Generate an image that locally resembles a seed image using wave function collapse"
)]
/// Command-line arguments for the generator
pub struct Cli {
    /// Seed image to sample tiles from
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Width in pixels of the local similarity window
    #[arg(value_name = "TILE_WIDTH")]
    pub tile_width: usize,

    /// Height in pixels of the local similarity window
    #[arg(value_name = "TILE_HEIGHT")]
    pub tile_height: usize,

    /// Path to save the result
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Result width in pixels
    #[arg(value_name = "WIDTH")]
    pub width: usize,

    /// Result height in pixels
    #[arg(value_name = "HEIGHT")]
    pub height: usize,

    /// Random seed for reproducible generation (0 picks one at random)
    #[arg(value_name = "RANDOM_SEED", default_value_t = NONDETERMINISTIC_SEED)]
    pub rnd_seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one generation: load, extract, collapse, export
pub struct Generator {
    cli: Cli,
    progress: CollapseProgress,
}

impl Generator {
    /// Create a generator for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            CollapseProgress::new()
        } else {
            CollapseProgress::hidden()
        };

        Self { cli, progress }
    }

    /// Generate the output image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The seed image cannot be loaded
    /// - The tile window or output size is invalid
    /// - The field would exceed the memory limit
    /// - The result cannot be written
    pub fn run(&mut self) -> Result<()> {
        let pattern = load_pattern(&self.cli.source)?;

        let started = Instant::now();
        let catalog = TileExtractor::extract(
            &pattern.pixels,
            pattern.width,
            pattern.height,
            self.cli.tile_width,
            self.cli.tile_height,
        )?;
        info!(
            "{} tiles were generated in {} ms",
            catalog.len(),
            started.elapsed().as_millis()
        );

        let footprint = Field::estimated_bytes(self.cli.width, self.cli.height, catalog.len());
        if footprint > MAX_FIELD_BYTES {
            return Err(invalid_parameter(
                "output size",
                &format!("{}x{}", self.cli.width, self.cli.height),
                &format!(
                    "{} tiles need {footprint} bytes, limit is {MAX_FIELD_BYTES}",
                    catalog.len()
                ),
            ));
        }

        let tile_count = catalog.len();
        let mut wave = Wave::new(self.cli.width, self.cli.height, catalog, self.cli.rnd_seed)?;
        info!("collapsing with seed {}", wave.rnd_seed());

        let started = Instant::now();
        self.progress.start(tile_count, wave.width(), wave.height());
        if self.cli.should_show_progress() {
            while !wave.collapse(true) {
                self.progress.update(wave.progress());
            }
        } else {
            wave.collapse(false);
        }
        let elapsed = started.elapsed();
        self.progress.finish(elapsed);
        info!("generation took {} ms", elapsed.as_millis());

        export_wave(&wave, &self.cli.output)
    }

    /// Parsed arguments driving this generator
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }
}
