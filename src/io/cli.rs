//! Command-line interface for offline scan sessions
//!
//! Sessions run against synthetic access points so the grid, scan and
//! persistence paths can be exercised without a headset or a radio.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use glam::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{info, warn};

use crate::io::configuration::{
    DEFAULT_HEATMAP_SCALE, DEFAULT_SEED, DEFAULT_SIMULATED_EMITTERS, DEFAULT_SIMULATION_STEPS,
    SignalGridConfig,
};
use crate::io::error::Result;
use crate::io::image::export_levels_as_png;
use crate::io::snapshot::SessionSnapshot;
use crate::model::idw::InverseDistanceModel;
use crate::model::synthetic::SyntheticSite;
use crate::scan::grid::ScanGrid;

#[derive(Parser, Debug)]
#[command(name = "signalgrid")]
#[command(
    author,
    version,
    about = "Simulate, inspect and render Wi-Fi signal grid sessions"
)]
/// Command-line arguments for the signal grid tools
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration overriding the built-in defaults
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report debug detail
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a synthetic scan session and save its snapshot
    Simulate(SimulateArgs),

    /// Summarize a saved snapshot
    Inspect {
        /// Snapshot file
        snapshot: PathBuf,
    },

    /// Render a saved snapshot as a PNG heat map
    Heatmap {
        /// Snapshot file
        snapshot: PathBuf,

        /// PNG output path
        output: PathBuf,

        /// Pixels per tile edge
        #[arg(long, default_value_t = DEFAULT_HEATMAP_SCALE)]
        scale: u32,
    },
}

/// Parameters of a synthetic session
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Play-area width in meters; non-positive selects the fallback area
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    pub width: f32,

    /// Play-area depth in meters; non-positive selects the fallback area
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub depth: f32,

    /// Synthetic access points to place
    #[arg(long, default_value_t = DEFAULT_SIMULATED_EMITTERS)]
    pub emitters: usize,

    /// Random positions to visit
    #[arg(long, default_value_t = DEFAULT_SIMULATION_STEPS)]
    pub steps: usize,

    /// Random seed for reproducible sessions
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Snapshot output path
    #[arg(short, long, default_value = "session.json")]
    pub output: PathBuf,

    /// Also render the snapshot as a PNG heat map
    #[arg(long, value_name = "PNG")]
    pub heatmap: Option<PathBuf>,
}

/// Runs one parsed command with its resolved configuration
pub struct Runner {
    cli: Cli,
    config: SignalGridConfig,
}

impl Runner {
    /// Resolve the configuration named on the command line, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded
    pub fn new(cli: Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => SignalGridConfig::load(path)?,
            None => SignalGridConfig::default(),
        };
        Ok(Self { cli, config })
    }

    /// Effective configuration
    pub const fn config(&self) -> &SignalGridConfig {
        &self.config
    }

    /// Execute the parsed command
    ///
    /// # Errors
    ///
    /// Returns an error if the session, snapshot or image I/O fails
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Simulate(args) => self.simulate(args),
            Command::Inspect { snapshot } => self.inspect(snapshot),
            Command::Heatmap {
                snapshot,
                output,
                scale,
            } => self.heatmap(snapshot, output, *scale),
        }
    }

    fn simulate(&self, args: &SimulateArgs) -> Result<()> {
        let scan = simulate_session(&self.config, args)?;
        let snapshot = SessionSnapshot::capture(&scan);
        snapshot.save(&args.output)?;
        info!(path = %args.output.display(), "wrote snapshot");

        if let Some(path) = &args.heatmap {
            export_levels_as_png(
                &snapshot.levels,
                snapshot.size(),
                &self.config.height_mapping(),
                DEFAULT_HEATMAP_SCALE,
                path,
            )?;
            info!(path = %path.display(), "wrote heat map");
        }
        Ok(())
    }

    fn inspect(&self, path: &Path) -> Result<()> {
        let snapshot = SessionSnapshot::load(path)?;
        info!(
            width = snapshot.width,
            height = snapshot.height,
            tile_size = snapshot.tile_size,
            margin = snapshot.margin,
            emitter = ?snapshot.emitter,
            "snapshot"
        );

        match snapshot.level_stats() {
            Some(stats) => {
                let coverage = stats.count as f64 / snapshot.levels.len().max(1) as f64;
                info!(
                    tiles = stats.count,
                    coverage = %format!("{:.1}%", coverage * 100.0),
                    min = stats.min,
                    max = stats.max,
                    mean = %format!("{:.1}", stats.mean),
                    "levels"
                );
            }
            None => warn!("snapshot holds no levels"),
        }

        if self.config.tile_size.to_bits() != snapshot.tile_size.to_bits()
            || self.config.margin != snapshot.margin
        {
            warn!("snapshot geometry differs from the active configuration");
        }
        Ok(())
    }

    fn heatmap(&self, snapshot_path: &Path, output: &Path, scale: u32) -> Result<()> {
        let snapshot = SessionSnapshot::load(snapshot_path)?;
        export_levels_as_png(
            &snapshot.levels,
            snapshot.size(),
            &self.config.height_mapping(),
            scale,
            output,
        )?;
        info!(path = %output.display(), "wrote heat map");
        Ok(())
    }
}

/// Run a synthetic session: random scan positions, then model the strongest emitter
///
/// Each visited position is pre-checked with [`ScanGrid::can_scan_at`], so a
/// tile is scanned at most once. Afterwards the strongest emitter heard is
/// selected and an inverse-distance model of its samples fills the computed
/// table.
///
/// # Errors
///
/// Returns an error if the configured grid cannot be built
pub fn simulate_session(config: &SignalGridConfig, args: &SimulateArgs) -> Result<ScanGrid> {
    let area = config.play_area(Some(Vec3::new(args.width, 0.0, args.depth)));
    let grid = Arc::new(config.build_grid(Some(area))?);
    let mut scan = ScanGrid::new(
        Arc::clone(&grid),
        config.display_config(),
        config.max_emitters,
    )
    .with_snap_radius(config.snap_radius);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let site = SyntheticSite::random(&mut rng, area, args.emitters);
    let (min, max) = grid.bounds();

    let mut visited = 0_usize;
    for _ in 0..args.steps {
        let position = Vec3::new(
            rng.random_range(min.x..=max.x),
            0.0,
            rng.random_range(min.z..=max.z),
        );
        let (_, allowed) = scan.can_scan_at(position);
        if !allowed {
            continue;
        }
        let readings = site.readings_at(position, &mut rng);
        if scan.record_scan(position, &readings).is_some() {
            visited += 1;
        }
    }

    info!(
        steps = args.steps,
        visited,
        scanned = scan.scanned_tile_count(),
        emitters = scan.known_emitters().len(),
        "simulated session"
    );

    if let Some(emitter) = scan.strongest_emitter() {
        scan.set_selected_emitter(emitter);
        let model =
            InverseDistanceModel::from_samples(scan.measured_samples()).with_power(config.idw_power);
        scan.compute_with(&model);
    }

    Ok(scan)
}
