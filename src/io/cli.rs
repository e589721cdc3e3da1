//! Command-line interface for solving a pipe grid and running the territory contest

use crate::algorithm::driver::{BatchDriver, StepDriver, run_contest};
use crate::algorithm::executor::{SolverConfig, WfcGrid};
use crate::algorithm::selection::{WeightOverride, WeightTable};
use crate::io::configuration::{
    DEFAULT_CONTEST_STEPS, DEFAULT_HEIGHT, DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_WIDTH,
    GIF_FRAME_DELAY_MS, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{RenderOptions, export_grid_as_png, rendered_size};
use crate::io::progress::ProgressManager;
use crate::io::visualization::ContestCapture;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

/// How the grid gets solved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Follow the lowest-entropy cell one collapse at a time
    #[default]
    Stepped,
    /// Solve overlapping 5x5 blocks, retrying blocks that contradict
    Batch,
}

#[derive(Parser, Debug)]
#[command(name = "pipetiles")]
#[command(
    author,
    version,
    about = "Fill a grid with connected pipe tiles, then let color tokens fight over it"
)]
/// Command-line arguments for the pipe tiling tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Solving strategy
    #[arg(long, value_enum, default_value_t = Strategy::Stepped)]
    pub strategy: Strategy,

    /// Column of the first cell collapsed by the stepped strategy
    #[arg(long, default_value_t = 0)]
    pub start_x: usize,

    /// Row of the first cell collapsed by the stepped strategy
    #[arg(long, default_value_t = 0)]
    pub start_y: usize,

    /// Tile weight override such as `h=2.5` or `top-left=0.5` (repeatable)
    #[arg(long = "weight", value_name = "SHAPE=WEIGHT")]
    pub weights: Vec<WeightOverride>,

    /// Maximum territory contest passes; 0 skips the contest
    #[arg(short, long, default_value_t = DEFAULT_CONTEST_STEPS)]
    pub contest_steps: usize,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Color pipes by the token owning each cell
    #[arg(short, long)]
    pub territory: bool,

    /// Highlight cells that agree with every collapsed neighbor
    #[arg(long)]
    pub overlay: bool,

    /// Write an animated GIF of the contest next to the output image
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver configuration described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or a weight override are invalid, or
    /// the grid would render larger than the image size limit
    pub fn solver_config(&self) -> Result<SolverConfig> {
        let mut weights = WeightTable::default();
        for &weight_override in &self.weights {
            weights.apply(weight_override)?;
        }

        let config = SolverConfig {
            width: self.width,
            height: self.height,
            seed: Some(self.seed),
            weights,
        };
        config.validate()?;
        rendered_size(config.width, config.height)?;
        Ok(config)
    }

    /// Rendering switches described by the arguments
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            territory: self.territory,
            validity_overlay: self.overlay,
        }
    }

    /// Path of the contest animation, next to the output image
    pub fn visualization_path(&self) -> PathBuf {
        let stem = self.output.file_stem().unwrap_or_default();
        let name = format!("{}{VISUALIZATION_SUFFIX}", stem.to_string_lossy());
        self.output
            .parent()
            .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    }
}

/// Counters reported after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cells resolved to one shape
    pub collapsed: usize,
    /// Cells left without candidates
    pub contradictions: usize,
    /// Contest passes executed
    pub contest_steps: usize,
    /// Whether the contest reached a pass that changed nothing
    pub contest_stable: bool,
}

/// Runs one solve, contest and export according to the arguments
pub struct Runner {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl Runner {
    /// Create a runner for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve, run the contest and write the outputs
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid or an output cannot be
    /// written
    pub fn run(&mut self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let config = self.cli.solver_config()?;
        let mut grid = WfcGrid::from_config(&config)?;

        self.solve(&mut grid)?;

        let (contest_steps, contest_stable) = if self.cli.contest_steps > 0 {
            self.contest(&mut grid)?
        } else {
            (0, false)
        };

        export_grid_as_png(&grid, &self.cli.render_options(), &self.cli.output)?;

        let summary = RunSummary {
            collapsed: grid.collapsed_count(),
            contradictions: grid.contradiction_count(),
            contest_steps,
            contest_stable,
        };
        tracing::info!(
            collapsed = summary.collapsed,
            contradictions = summary.contradictions,
            contest_steps = summary.contest_steps,
            contest_stable = summary.contest_stable,
            elapsed_ms = start_time.elapsed().as_millis(),
            "run finished"
        );
        Ok(summary)
    }

    fn solve(&mut self, grid: &mut WfcGrid) -> Result<()> {
        match self.cli.strategy {
            Strategy::Stepped => {
                let start = (self.cli.start_x, self.cli.start_y);
                if !grid.grid_state.contains(start.0, start.1) {
                    return Err(invalid_parameter(
                        "start",
                        &format!("{},{}", start.0, start.1),
                        &format!("must lie inside the {}x{} grid", grid.width(), grid.height()),
                    ));
                }

                let cell_count = grid.grid_state.cell_count();
                self.progress_manager.start_solve(cell_count);
                let progress = &self.progress_manager;
                let steps = StepDriver::new(start).solve(grid, cell_count, |step| {
                    progress.update_solve(step);
                })?;
                progress.finish_solve(format!("{steps} collapses"));
            }
            Strategy::Batch => {
                let mut driver = BatchDriver::new(grid.width(), grid.height());
                self.progress_manager.start_solve(driver.remaining());
                let progress = &self.progress_manager;
                let mut done = 0;
                let reports = driver.solve(grid, |_| {
                    done += 1;
                    progress.update_solve(done);
                });
                let retried = reports.iter().filter(|report| report.attempts > 1).count();
                progress.finish_solve(format!("{} batches, {retried} retried", reports.len()));
            }
        }
        Ok(())
    }

    fn contest(&mut self, grid: &mut WfcGrid) -> Result<(usize, bool)> {
        let max_steps = self.cli.contest_steps;
        self.progress_manager.start_contest(max_steps);
        let progress = &self.progress_manager;

        let mut capture = self
            .cli
            .visualize
            .then(|| ContestCapture::new(self.cli.overlay));
        if let Some(recorder) = capture.as_mut() {
            recorder.record(grid);
        }

        let summary = run_contest(grid, max_steps, |state, step| {
            progress.update_contest(step);
            if let Some(recorder) = capture.as_mut() {
                recorder.record(state);
            }
        });
        progress.finish_contest(format!("{} passes", summary.steps));

        if let Some(recorder) = capture {
            recorder.export_gif(&self.cli.visualization_path(), GIF_FRAME_DELAY_MS)?;
        }

        Ok((summary.steps, summary.stable))
    }
}
