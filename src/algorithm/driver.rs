//! Loops that pace the grid through solving and the territory contest
//!
//! Each driver owns only its own bookkeeping (a cursor, a batch queue) and
//! talks to the grid through its public operations.

use std::collections::VecDeque;
use std::ops::Range;

use crate::algorithm::executor::WfcGrid;
use crate::io::configuration::{BATCH_SIZE, MAX_BATCH_RETRIES};
use crate::io::error::{Result, SolverError};

/// Cursor-following solver
///
/// Collapses the cell under the cursor, then moves the cursor to the
/// lowest-entropy undecided cell.
#[derive(Debug, Clone)]
pub struct StepDriver {
    cursor: (usize, usize),
    /// Collapses performed so far
    pub steps: usize,
}

impl StepDriver {
    /// Start with the cursor on a chosen cell
    pub const fn new(start: (usize, usize)) -> Self {
        Self {
            cursor: start,
            steps: 0,
        }
    }

    /// Collapse the cursor and advance it
    ///
    /// Returns `Ok(false)` once no undecided cell remains.
    ///
    /// # Errors
    ///
    /// Propagates any grid error other than `NoUndecidedCells`
    ///
    /// # Panics
    ///
    /// Panics if the starting cursor is outside the grid
    pub fn run_iteration(&mut self, grid: &mut WfcGrid) -> Result<bool> {
        let (x, y) = self.cursor;
        grid.collapse(x, y);
        self.steps += 1;

        match grid.find_lowest_entropy() {
            Ok(next) => {
                self.cursor = next;
                Ok(true)
            }
            Err(SolverError::NoUndecidedCells { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Iterate until nothing is left to decide or `max_steps` collapses ran
    ///
    /// `on_step` is called after every collapse with the running step count.
    ///
    /// # Errors
    ///
    /// Propagates any grid error other than `NoUndecidedCells`
    pub fn solve(
        &mut self,
        grid: &mut WfcGrid,
        max_steps: usize,
        mut on_step: impl FnMut(usize),
    ) -> Result<usize> {
        while self.steps < max_steps {
            let should_continue = self.run_iteration(grid)?;
            on_step(self.steps);
            if !should_continue {
                break;
            }
        }
        tracing::info!(steps = self.steps, "stepped solve finished");
        Ok(self.steps)
    }
}

/// Rectangular block of cells handled as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Column range
    pub xs: Range<usize>,
    /// Row range
    pub ys: Range<usize>,
}

impl Batch {
    /// Coordinates in the block, x outer and y inner
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let ys = self.ys.clone();
        self.xs
            .clone()
            .flat_map(move |x| ys.clone().map(move |y| (x, y)))
    }

    /// Region covering batch `(bx, by)` widened by one cell up and left
    pub fn region(bx: usize, by: usize, width: usize, height: usize) -> Self {
        let origin = |index: usize, extent: usize| {
            (index * BATCH_SIZE).saturating_sub(1).min(extent.saturating_sub(1))
        };
        let x0 = origin(bx, width);
        let y0 = origin(by, height);
        Self {
            xs: x0..(x0 + BATCH_SIZE + 1).min(width),
            ys: y0..(y0 + BATCH_SIZE + 1).min(height),
        }
    }
}

/// Outcome of one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// The block that was solved
    pub batch: Batch,
    /// Passes run, including the first
    pub attempts: usize,
    /// Whether the accepted pass left no contradiction in the block
    pub clean: bool,
}

/// Block-by-block solver
///
/// Splits the grid into `BATCH_SIZE` square blocks overlapping their upper and
/// left neighbors by one cell, and collapses every cell of a block in turn. A
/// block that ends with a contradiction is reset and solved again, up to
/// `MAX_BATCH_RETRIES` times, after which it is accepted as is.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    queue: VecDeque<Batch>,
    max_retries: usize,
}

impl BatchDriver {
    /// Queue every block of a grid, block columns outer and block rows inner
    pub fn new(width: usize, height: usize) -> Self {
        let columns = width.div_ceil(BATCH_SIZE);
        let rows = height.div_ceil(BATCH_SIZE);
        let queue = (0..columns)
            .flat_map(|bx| (0..rows).map(move |by| Batch::region(bx, by, width, height)))
            .collect();

        Self {
            queue,
            max_retries: MAX_BATCH_RETRIES,
        }
    }

    /// Override the retry limit
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Blocks not yet solved
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Solve the next block, or `None` once the queue is empty
    pub fn run_batch(&mut self, grid: &mut WfcGrid) -> Option<BatchReport> {
        let batch = self.queue.pop_front()?;
        let mut attempts = 0;

        loop {
            if attempts > 0 {
                for (x, y) in batch.cells() {
                    grid.reset_tile(x, y);
                }
            }
            attempts += 1;

            let mut any_failed = false;
            for (x, y) in batch.cells() {
                grid.collapse(x, y);
                any_failed |= grid.get_tile(x, y).is_empty();
            }

            if !any_failed {
                return Some(BatchReport {
                    batch,
                    attempts,
                    clean: true,
                });
            }
            if attempts > self.max_retries {
                tracing::warn!(
                    attempts,
                    xs = ?batch.xs,
                    ys = ?batch.ys,
                    "batch kept contradictions after all retries"
                );
                return Some(BatchReport {
                    batch,
                    attempts,
                    clean: false,
                });
            }
            tracing::debug!(attempts, xs = ?batch.xs, ys = ?batch.ys, "retrying batch");
        }
    }

    /// Solve every queued block
    ///
    /// `on_batch` is called after each block.
    pub fn solve(
        &mut self,
        grid: &mut WfcGrid,
        mut on_batch: impl FnMut(&BatchReport),
    ) -> Vec<BatchReport> {
        let mut reports = Vec::with_capacity(self.queue.len());
        while let Some(report) = self.run_batch(grid) {
            on_batch(&report);
            reports.push(report);
        }
        let clean = reports.iter().filter(|report| report.clean).count();
        tracing::info!(batches = reports.len(), clean, "batch solve finished");
        reports
    }
}

/// Summary of a contest run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestSummary {
    /// Passes executed
    pub steps: usize,
    /// Whether the last pass changed nothing
    pub stable: bool,
    /// Battles fought over all passes
    pub battles: usize,
    /// Tokens promoted to dominant over all passes
    pub promotions: usize,
}

/// Run contest passes until one changes nothing or `max_steps` passes ran
///
/// `on_step` is called after every pass with the pass number.
pub fn run_contest(
    grid: &mut WfcGrid,
    max_steps: usize,
    mut on_step: impl FnMut(&WfcGrid, usize),
) -> ContestSummary {
    let mut summary = ContestSummary {
        steps: 0,
        stable: false,
        battles: 0,
        promotions: 0,
    };

    while summary.steps < max_steps {
        let outcome = grid.contest_pass();
        summary.steps += 1;
        summary.battles += outcome.battles;
        summary.promotions += outcome.promotions;
        on_step(grid, summary.steps);
        if !outcome.changed() {
            summary.stable = true;
            break;
        }
    }

    tracing::info!(
        steps = summary.steps,
        stable = summary.stable,
        battles = summary.battles,
        promotions = summary.promotions,
        "territory contest finished"
    );
    summary
}
